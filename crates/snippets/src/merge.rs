//! Merging generated documents into an existing page.
//!
//! A generation answer may carry a `SPREAD_PATHS: a.b, c` line naming the
//! parts of the current page it extends rather than replaces. Those paths are
//! merged path by path; without any, the generated document replaces the page.

use crate::error::SnippetError;
use once_cell::sync::Lazy;
use pagesmith_jpath::{assign, parse_path, select};
use regex::Regex;
use serde_json::{Map, Value, json};

static SPREAD_PATHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPREAD_PATHS:\s*([^\n]+)").expect("spread paths pattern"));

/// Extracts the merge paths from the first `SPREAD_PATHS:` line in `text`.
pub fn parse_spread_instructions(text: &str) -> Vec<String> {
    let Some(caps) = SPREAD_PATHS.captures(text) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

/// An empty page document.
pub fn empty_document() -> Value {
    json!({ "content": [], "zones": {}, "root": {} })
}

/// Merges `generated` into a copy of `existing` at each of `paths`.
///
/// Arrays on both sides concatenate (existing first), objects on both sides
/// are deep-merged with the generated side winning, anything else is
/// replaced. Paths the generated document has no value for are skipped.
pub fn merge_with_existing(
    existing: Option<&Value>,
    generated: Option<&Value>,
    paths: &[String],
) -> Value {
    let existing = match existing {
        Some(existing) if !paths.is_empty() => existing,
        _ => return generated.cloned().unwrap_or_else(empty_document),
    };
    let Some(generated) = generated else {
        return existing.clone();
    };

    let mut result = existing.clone();
    for path in paths {
        if let Err(e) = merge_path(&mut result, generated, path) {
            log::warn!("skipping merge path '{}': {}", path, e);
        }
    }
    result
}

fn merge_path(result: &mut Value, generated: &Value, path: &str) -> Result<(), SnippetError> {
    let parsed = parse_path(path)?;
    let Some(incoming) = select(generated, &parsed) else {
        return Ok(());
    };

    let merged = match select(result, &parsed) {
        Some(Value::Array(current)) if incoming.is_array() => {
            let mut combined = current.clone();
            combined.extend(incoming.as_array().into_iter().flatten().cloned());
            Value::Array(combined)
        }
        Some(current @ Value::Object(_)) if incoming.is_object() => {
            let mut combined = current.clone();
            deep_merge(&mut combined, incoming);
            combined
        }
        _ => incoming.clone(),
    };
    assign(result, &parsed, merged)?;
    Ok(())
}

/// Recursively merges `source` into `target`.
///
/// Objects merge key by key and arrays element by element; any other source
/// value overwrites the target.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => merge_objects(target, source),
        (Value::Array(target), Value::Array(source)) => {
            for (index, item) in source.iter().enumerate() {
                match target.get_mut(index) {
                    Some(slot) => deep_merge(slot, item),
                    None => target.push(item.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(slot) => deep_merge(slot, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spread_instructions() {
        let text = "Here is the layout.\nspread_paths: content ,zones.base-1:children, \nDone";
        assert_eq!(
            parse_spread_instructions(text),
            vec!["content".to_string(), "zones.base-1:children".to_string()]
        );
        assert!(parse_spread_instructions("no instructions").is_empty());
    }

    #[test]
    fn test_without_paths_generated_wins() {
        let existing = json!({ "content": [1] });
        let generated = json!({ "content": [2] });
        assert_eq!(
            merge_with_existing(Some(&existing), Some(&generated), &[]),
            generated
        );
        assert_eq!(merge_with_existing(None, None, &[]), empty_document());
    }

    #[test]
    fn test_without_generated_existing_wins() {
        let existing = json!({ "content": [1] });
        let paths = vec!["content".to_string()];
        assert_eq!(merge_with_existing(Some(&existing), None, &paths), existing);
    }

    #[test]
    fn test_arrays_concatenate() {
        let existing = json!({ "content": [{ "a": 1 }], "root": {} });
        let generated = json!({ "content": [{ "b": 2 }] });
        let merged = merge_with_existing(
            Some(&existing),
            Some(&generated),
            &["content".to_string()],
        );
        assert_eq!(merged["content"], json!([{ "a": 1 }, { "b": 2 }]));
        assert_eq!(existing["content"], json!([{ "a": 1 }]));
    }

    #[test]
    fn test_objects_deep_merge() {
        let existing = json!({ "root": { "props": { "title": "Old", "description": "Kept" } } });
        let generated = json!({ "root": { "props": { "title": "New" } } });
        let merged = merge_with_existing(
            Some(&existing),
            Some(&generated),
            &["root".to_string()],
        );
        assert_eq!(
            merged["root"]["props"],
            json!({ "title": "New", "description": "Kept" })
        );
    }

    #[test]
    fn test_scalars_replace_and_missing_paths_skip() {
        let existing = json!({ "root": { "props": { "title": "Old" } } });
        let generated = json!({ "root": { "props": { "title": "New" } } });
        let merged = merge_with_existing(
            Some(&existing),
            Some(&generated),
            &["root.props.title".to_string(), "zones.x:children".to_string()],
        );
        assert_eq!(merged["root"]["props"]["title"], json!("New"));
        assert!(merged.get("zones").is_none());
    }

    #[test]
    fn test_merge_creates_missing_zone() {
        let existing = json!({ "content": [], "zones": {} });
        let generated = json!({ "zones": { "card-1:content": [{ "type": "base" }] } });
        let merged = merge_with_existing(
            Some(&existing),
            Some(&generated),
            &["zones.card-1:content".to_string()],
        );
        assert_eq!(merged["zones"]["card-1:content"], json!([{ "type": "base" }]));
    }

    #[test]
    fn test_deep_merge_arrays_by_index() {
        let mut target = json!({ "list": [{ "a": 1 }, 2] });
        deep_merge(&mut target, &json!({ "list": [{ "b": 3 }] }));
        assert_eq!(target, json!({ "list": [{ "a": 1, "b": 3 }, 2] }));
    }
}
