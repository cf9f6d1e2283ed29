//! Tree flattening.
//!
//! Generated documents describe nesting with a transient `parentId` (and an
//! optional `zoneName`) on each node of a flat `content` array. This stage
//! relocates every parented node into `zones["{parentId}:{zoneName}"]`, moves
//! the envelope `id` into `props.id` and drops the transient fields.
//!
//! Must run after identifier resolution: `parentId` has to already equal the
//! final identifier of the parent.

use crate::error::SnippetError;
use crate::stage::{Stage, fail_soft};
use pagesmith_types::DEFAULT_ZONE;
use serde_json::{Map, Value};

const TRANSIENT_FIELDS: [&str; 3] = ["id", "parentId", "zoneName"];

/// Flattens `parentId` relationships into the `zones` map.
pub fn flatten_zones(content: &str) -> String {
    fail_soft(Stage::Zones, content, try_flatten(content))
}

fn try_flatten(content: &str) -> Result<Option<String>, SnippetError> {
    let mut data: Value = serde_json::from_str(content)?;
    let Some(document) = data.as_object_mut() else {
        return Ok(None);
    };
    let Some(Value::Array(nodes)) = document.get_mut("content") else {
        return Ok(None);
    };
    if !nodes.iter().any(has_transient_fields) {
        return Ok(None);
    }

    let mut top_level = Vec::with_capacity(nodes.len());
    let mut nested: Map<String, Value> = Map::new();
    let mut relocated = 0usize;

    for node in std::mem::take(nodes) {
        let (node, zone_key) = detach(node);
        match zone_key {
            Some(key) => {
                relocated += 1;
                push_to_zone(&mut nested, key, node);
            }
            None => top_level.push(node),
        }
    }
    *nodes = top_level;

    let zones = document
        .entry("zones")
        .or_insert_with(|| Value::Object(Map::new()));
    if !zones.is_object() {
        log::warn!("[{}] replacing non-object 'zones' field", Stage::Zones);
        *zones = Value::Object(Map::new());
    }
    if let Value::Object(zones) = zones {
        for (key, incoming) in nested {
            if let Value::Array(incoming) = incoming {
                for node in incoming {
                    push_to_zone(zones, key.clone(), node);
                }
            }
        }
    }

    log::debug!("[{}] relocated {} nodes into zones", Stage::Zones, relocated);
    Ok(Some(serde_json::to_string_pretty(&data)?))
}

fn has_transient_fields(node: &Value) -> bool {
    node.as_object()
        .is_some_and(|n| TRANSIENT_FIELDS.iter().any(|f| n.contains_key(*f)))
}

/// Strips the transient fields off one node, returning it with the zone key
/// it belongs in (`None` for top-level nodes).
fn detach(mut node: Value) -> (Value, Option<String>) {
    let Some(envelope) = node.as_object_mut() else {
        return (node, None);
    };

    let parent = envelope
        .shift_remove("parentId")
        .filter(|parent| !parent.is_null());
    let zone_name = envelope.shift_remove("zoneName");

    if let Some(id) = envelope.shift_remove("id") {
        let props = envelope
            .entry("props")
            .or_insert_with(|| Value::Object(Map::new()));
        if !props.is_object() {
            *props = Value::Object(Map::new());
        }
        if let Value::Object(props) = props {
            props.insert("id".to_string(), id);
        }
    }

    let zone_key = parent.map(|parent| {
        let zone = zone_name
            .as_ref()
            .and_then(Value::as_str)
            .filter(|z| !z.is_empty())
            .unwrap_or(DEFAULT_ZONE);
        format!("{}:{}", plain_string(&parent), zone)
    });

    (node, zone_key)
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_to_zone(zones: &mut Map<String, Value>, key: String, node: Value) {
    let slot = zones.entry(key).or_insert_with(|| Value::Array(Vec::new()));
    match slot {
        Value::Array(children) => children.push(node),
        other => *other = Value::Array(vec![node]),
    }
}
