//! `{copy(path)}` and `{spread(path)}` reference resolution.
//!
//! Both placeholders are looked up against a source document (normally the
//! previously saved page) and spliced into the text. `copy` yields the plain
//! string form of the value, suitable inside a JSON string literal. `spread`
//! yields a raw JSON fragment and must sit where a JSON value may appear, e.g.
//! `{"style": {spread(styles.button)}}`. Nothing checks that placement.

use crate::number;
use once_cell::sync::Lazy;
use pagesmith_jpath::select_path;
use regex::{Captures, Regex};
use serde_json::Value;

static COPY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{copy\(([A-Za-z0-9_.:\-]+)\)\}").expect("copy pattern"));

static SPREAD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{spread\(([A-Za-z0-9_.:\-]+)\)\}").expect("spread pattern"));

/// Replaces every `{copy(path)}` with the value found at `path` in `source`.
///
/// Missing values become the empty string, objects and arrays their compact
/// JSON form, strings their raw contents, whole numbers their integer form
/// (`3.0` reads `3`) and other scalars their JSON text.
/// Without a source the input is returned unchanged.
pub fn copy(input: &str, source: Option<&Value>) -> String {
    substitute(&COPY_PATTERN, input, source, |value| match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number::canonical(n),
        Some(other) => other.to_string(),
    })
}

/// Replaces every `{spread(path)}` with the JSON text of the value found at
/// `path` in `source`, or `{}` when nothing is there.
pub fn spread(input: &str, source: Option<&Value>) -> String {
    substitute(&SPREAD_PATTERN, input, source, |value| match value {
        None => "{}".to_string(),
        Some(value) => value.to_string(),
    })
}

/// Runs [`copy`] then [`spread`].
pub fn resolve_references(input: &str, source: Option<&Value>) -> String {
    let copied = copy(input, source);
    spread(&copied, source)
}

fn substitute<F>(pattern: &Regex, input: &str, source: Option<&Value>, render: F) -> String
where
    F: Fn(Option<&Value>) -> String,
{
    let Some(source) = source else {
        return input.to_string();
    };
    if !pattern.is_match(input) {
        return input.to_string();
    }

    pattern
        .replace_all(input, |caps: &Captures| {
            let path = &caps[1];
            let found = select_path(source, path);
            if found.is_none() {
                log::debug!("reference '{}' resolved to nothing", path);
            }
            render(found)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card_source() -> Value {
        json!({ "content": [{ "type": "card", "props": { "title": "Test Title", "id": "card-1" } }] })
    }

    #[test]
    fn test_copy_scalar() {
        let output = copy(
            r#"{"title": "{copy(content.0.props.title)}"}"#,
            Some(&card_source()),
        );
        assert_eq!(output, r#"{"title": "Test Title"}"#);
    }

    #[test]
    fn test_copy_object_is_compact_json() {
        let source = json!({ "meta": { "a": 1, "b": [true, null] } });
        assert_eq!(
            copy("{copy(meta)}", Some(&source)),
            r#"{"a":1,"b":[true,null]}"#
        );
    }

    #[test]
    fn test_copy_scalars_and_null() {
        let source = json!({ "n": 2.5, "flag": false, "nothing": null });
        assert_eq!(
            copy("{copy(n)} {copy(flag)} {copy(nothing)}", Some(&source)),
            "2.5 false null"
        );
    }

    #[test]
    fn test_copy_whole_float_reads_as_integer() {
        let source = json!({ "columns": 3.0, "ratio": 1.5 });
        assert_eq!(
            copy("{copy(columns)} / {copy(ratio)}", Some(&source)),
            "3 / 1.5"
        );
    }

    #[test]
    fn test_copy_skips_stray_dots() {
        assert_eq!(
            copy("{copy(content..0.props.title)}", Some(&card_source())),
            "Test Title"
        );
    }

    #[test]
    fn test_copy_missing_is_empty() {
        assert_eq!(
            copy(r#""{copy(content.9.props.title)}""#, Some(&card_source())),
            r#""""#
        );
    }

    #[test]
    fn test_copy_through_zone_key() {
        let source = json!({
            "zones": { "card-1:content": [{ "props": { "text": "Nested" } }] }
        });
        assert_eq!(
            copy("{copy(zones.card-1:content.0.props.text)}", Some(&source)),
            "Nested"
        );
    }

    #[test]
    fn test_spread_object() {
        let source = json!({ "styles": { "button": { "background": "#ff0000", "padding": "1rem" } } });
        let output = spread(r#"{"buttonStyle": {spread(styles.button)}}"#, Some(&source));
        assert_eq!(
            output,
            r##"{"buttonStyle": {"background":"#ff0000","padding":"1rem"}}"##
        );
    }

    #[test]
    fn test_spread_array_and_missing() {
        let source = json!({ "tags": ["a", "b"] });
        assert_eq!(
            spread(r#"{"t": {spread(tags)}, "m": {spread(missing.path)}}"#, Some(&source)),
            r#"{"t": ["a","b"], "m": {}}"#
        );
    }

    #[test]
    fn test_no_source_is_passthrough() {
        let input = r#"{"title": "{copy(a.b)}", "x": {spread(a)}}"#;
        assert_eq!(resolve_references(input, None), input);
    }

    #[test]
    fn test_no_pattern_is_passthrough() {
        let input = r#"{ "content": [ 1, 2 ] }"#;
        assert_eq!(resolve_references(input, Some(&card_source())), input);
        assert_eq!(resolve_references(input, None), input);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let source = card_source();
        let before = source.clone();
        let _ = resolve_references("{copy(content.0.props.id)}", Some(&source));
        assert_eq!(source, before);
    }
}
