//! Stage composition.

use crate::ids::{IdGenerator, UuidGenerator, resolve_id_placeholders_with, resolve_ids_with};
use crate::properties::materialize_properties;
use crate::references::{copy, resolve_references, spread};
use crate::zones::flatten_zones;
use once_cell::sync::Lazy;
use pagesmith_types::{PageDocument, ValidationError};
use regex::Regex;
use serde_json::Value;

static SNIPPET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[A-Za-z]+\((?:\d+|[A-Za-z0-9_.:\-]+)?\)\}").expect("snippet pattern")
});

/// Runs the snippet stages in their fixed order.
///
/// Each stage consumes the whole output of the one before it. A stage that
/// cannot parse its input passes it on unchanged, so the pipeline itself
/// never fails.
#[derive(Debug, Default)]
pub struct Pipeline<G: IdGenerator = UuidGenerator> {
    ids: G,
}

impl Pipeline<UuidGenerator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> Pipeline<G> {
    /// Uses `ids` for every identifier this pipeline generates.
    pub fn with_generator(ids: G) -> Self {
        Self { ids }
    }

    /// Rewrites `raw` into a resolved document string.
    ///
    /// `source` is the document `{copy(..)}` and `{spread(..)}` read from,
    /// usually the previously saved page. It is never modified.
    pub fn process(&mut self, raw: &str, source: Option<&Value>) -> String {
        log::debug!("processing {} bytes", raw.len());
        let text = resolve_id_placeholders_with(raw, &mut self.ids);
        let text = resolve_ids_with(&text, &mut self.ids);
        let text = materialize_properties(&text);
        let text = resolve_references(&text, source);
        flatten_zones(&text)
    }
}

/// Runs the full pipeline with random identifiers.
pub fn process_document(raw: &str, source: Option<&Value>) -> String {
    Pipeline::new().process(raw, source)
}

/// Runs the pipeline and parses the result as a validated [`PageDocument`].
pub fn process_page(
    raw: &str,
    source: Option<&PageDocument>,
) -> Result<PageDocument, ValidationError> {
    let source = source.map(PageDocument::to_value).transpose()?;
    let processed = process_document(raw, source.as_ref());
    PageDocument::from_json(&processed)
}

/// True if `text` contains anything that looks like a `{name(arg)}` snippet.
pub fn has_snippet_patterns(text: &str) -> bool {
    SNIPPET_PATTERN.is_match(text)
}

/// Resolves textual snippets inside an already-parsed value.
///
/// Only the text-level stages apply (`{id(n)}`, `{copy}`, `{spread}`); the
/// structural stages are left to [`process_document`]. References read from
/// `previous` when given, otherwise from `data` itself. If the rewritten text
/// no longer parses, `data` is returned as it was.
pub fn resolve_snippets(data: &Value, previous: Option<&Value>) -> Value {
    let text = data.to_string();
    if !has_snippet_patterns(&text) {
        return data.clone();
    }

    let source = previous.unwrap_or(data);
    let text = resolve_id_placeholders_with(&text, &mut UuidGenerator);
    let text = copy(&text, Some(source));
    let text = spread(&text, Some(source));

    match serde_json::from_str(&text) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("resolved snippets are no longer valid JSON: {}", e);
            data.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use serde_json::json;

    #[test]
    fn test_end_to_end_dropzone_with_text_child() {
        let raw = json!({
            "root": { "props": { "title": "Landing" } },
            "content": [
                {
                    "id": 1,
                    "type": "base",
                    "props": { "element": "section", "children": "dropzone", "childrenProps": {} }
                },
                {
                    "id": 2,
                    "parentId": 1,
                    "type": "base",
                    "props": { "element": "p", "children": "text", "childrenProps": { "value": "Hello" } }
                }
            ]
        })
        .to_string();

        let mut pipeline = Pipeline::with_generator(SequentialIds::new());
        let output: Value = serde_json::from_str(&pipeline.process(&raw, None)).unwrap();

        let a = "base-00000000-0000-4000-8000-000000000001";
        let b = "base-00000000-0000-4000-8000-000000000002";
        assert_eq!(output["content"].as_array().unwrap().len(), 1);
        assert_eq!(output["content"][0]["props"]["id"], json!(a));
        let zone = output["zones"][format!("{a}:children")].as_array().unwrap();
        assert_eq!(zone.len(), 1);
        assert_eq!(zone[0]["props"]["id"], json!(b));
        assert_eq!(zone[0]["props"]["childrenProps"]["value"], json!("Hello"));
    }

    #[test]
    fn test_final_form_document_is_unchanged() {
        let input = r#"{"content": [{"type": "base", "props": {"id": "base-a", "element": "div"}}], "zones": {}}"#;
        assert_eq!(process_document(input, None), input);
    }

    #[test]
    fn test_malformed_input_passes_through() {
        let input = r#"{"content": [{"id": 1, "type": "base""#;
        assert_eq!(process_document(input, Some(&json!({}))), input);
    }

    #[test]
    fn test_process_page_validates() {
        let raw = json!({
            "content": [
                { "id": 1, "type": "typography", "props": { "variant": "h1", "text": "Hi" } }
            ]
        })
        .to_string();
        let page = process_page(&raw, None).unwrap();
        assert_eq!(page.content.len(), 1);
        assert!(page.content[0].id().as_str().starts_with("typography-"));
    }

    #[test]
    fn test_process_page_rejects_bad_shape() {
        let raw = r#"{"content": [{"type": "spaceship", "props": {"id": "x"}}]}"#;
        assert!(process_page(raw, None).is_err());
    }

    #[test]
    fn test_has_snippet_patterns() {
        assert!(has_snippet_patterns("{id(3)}"));
        assert!(has_snippet_patterns("{copy(content.0.props.title)}"));
        assert!(has_snippet_patterns("{spread(zones.card-1:content)}"));
        assert!(!has_snippet_patterns("{\"plain\": \"json\"}"));
    }

    #[test]
    fn test_resolve_snippets_reads_from_itself() {
        let data = json!({ "title": "Home", "heading": "{copy(title)}" });
        let resolved = resolve_snippets(&data, None);
        assert_eq!(resolved["heading"], json!("Home"));
    }

    #[test]
    fn test_resolve_snippets_prefers_previous() {
        let data = json!({ "title": "New", "heading": "{copy(title)}" });
        let previous = json!({ "title": "Old" });
        assert_eq!(resolve_snippets(&data, Some(&previous))["heading"], json!("Old"));
    }

    #[test]
    fn test_resolve_snippets_keeps_data_on_broken_splice() {
        // A spread inside a string literal produces unbalanced quotes.
        let data = json!({ "style": "{spread(theme)}" });
        let previous = json!({ "theme": "dark \"mode" });
        assert_eq!(resolve_snippets(&data, Some(&previous)), data);
    }
}
