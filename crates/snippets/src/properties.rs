//! Property materialization.
//!
//! Generation sources attach values inline on the typed property schema
//! (`properties: [{key, valueType, value}]`). Renderers read a flat
//! `values` map instead, so values are moved there and the schema list is left
//! holding declarations only.

use crate::error::SnippetError;
use crate::stage::{Stage, fail_soft};
use serde_json::{Map, Value};

/// Moves `props.properties[].value` into `props.values[key]`.
///
/// Documents with no inline property values come back byte-for-byte unchanged.
pub fn materialize_properties(content: &str) -> String {
    fail_soft(Stage::Properties, content, try_materialize(content))
}

fn try_materialize(content: &str) -> Result<Option<String>, SnippetError> {
    let mut data: Value = serde_json::from_str(content)?;
    let Some(document) = data.as_object_mut() else {
        return Ok(None);
    };
    if !matches!(document.get("content"), Some(Value::Array(_))) {
        return Ok(None);
    }

    let mut changed = 0usize;
    if let Some(Value::Array(nodes)) = document.get_mut("content") {
        changed += materialize_all(nodes);
    }
    if let Some(Value::Object(zones)) = document.get_mut("zones") {
        for nodes in zones.values_mut() {
            if let Value::Array(nodes) = nodes {
                changed += materialize_all(nodes);
            }
        }
    }

    if changed == 0 {
        return Ok(None);
    }
    log::debug!("[{}] materialized values on {} nodes", Stage::Properties, changed);
    Ok(Some(serde_json::to_string_pretty(&data)?))
}

/// Returns how many of `nodes` carried inline values.
fn materialize_all(nodes: &mut [Value]) -> usize {
    let mut changed = 0;
    for node in nodes.iter_mut() {
        if materialize_node(node) {
            changed += 1;
        }
    }
    changed
}

/// Returns true if the node carried at least one inline value.
fn materialize_node(node: &mut Value) -> bool {
    let Some(props) = node.get_mut("props").and_then(Value::as_object_mut) else {
        return false;
    };
    let Some(Value::Array(properties)) = props.get("properties") else {
        return false;
    };
    if !properties
        .iter()
        .any(|p| p.as_object().is_some_and(|p| p.contains_key("value")))
    {
        return false;
    }

    let mut moved = Map::new();
    if let Some(Value::Array(properties)) = props.get_mut("properties") {
        for property in properties.iter_mut() {
            let Some(property) = property.as_object_mut() else {
                continue;
            };
            let Some(value) = property.shift_remove("value") else {
                continue;
            };
            match property.get("key").and_then(Value::as_str) {
                Some(key) if !key.is_empty() => {
                    moved.insert(key.to_string(), value);
                }
                _ => {}
            }
        }
    }

    let values = props
        .entry("values")
        .or_insert_with(|| Value::Object(Map::new()));
    if !values.is_object() {
        *values = Value::Object(Map::new());
    }
    if let Value::Object(values) = values {
        values.extend(moved);
    }
    true
}
