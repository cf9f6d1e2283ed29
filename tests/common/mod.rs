pub mod fixtures;

use pagesmith::{PageDocument, Pipeline};
use pagesmith_snippets::SequentialIds;
use regex::Regex;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Runs the pipeline with deterministic identifiers and parses the output.
pub fn process_deterministic(raw: &Value, source: Option<&Value>) -> Value {
    let mut pipeline = Pipeline::with_generator(SequentialIds::new());
    let output = pipeline.process(&raw.to_string(), source);
    serde_json::from_str(&output).expect("pipeline output should be JSON")
}

/// Asserts `id` looks like `{type}-{uuid}`.
pub fn assert_typed_id(id: &str, type_name: &str) {
    let re = Regex::new(&format!(
        r"^{}-[0-9a-f]{{8}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{12}}$",
        regex::escape(type_name)
    ))
    .unwrap();
    assert!(re.is_match(id), "'{}' is not a {} identifier", id, type_name);
}

/// Collects every node id in document order (content first, then zones).
pub fn node_ids(document: &PageDocument) -> Vec<String> {
    document.nodes().map(|n| n.id().to_string()).collect()
}
