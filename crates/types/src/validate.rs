//! Final-shape validation of a resolved page document.
//!
//! Shape errors come from deserialization; the checks here cover the
//! structural invariants serde cannot express: identifier uniqueness, zone
//! ownership, and the zone graph being a single rooted tree.

use crate::document::PageDocument;
use crate::ids::{NodeId, ZoneKey};
use crate::node::{Node, ValueType};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Document does not match the page shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Node of type '{0}' has an empty identifier")]
    EmptyId(&'static str),

    #[error("Duplicate node identifier '{0}'")]
    DuplicateId(NodeId),

    #[error("Malformed zone key '{0}', expected '{{nodeId}}:{{zoneName}}'")]
    MalformedZoneKey(String),

    #[error("Zone '{zone}' belongs to unknown node '{owner}'")]
    UnknownZoneOwner { zone: ZoneKey, owner: NodeId },

    #[error("Zone '{0}' is nested inside itself")]
    ZoneCycle(ZoneKey),

    #[error("Node '{node}' has a value for undeclared property '{key}'")]
    UndeclaredValue { node: NodeId, key: String },

    #[error("Node '{node}' property '{key}' expects a {expected} value")]
    ValueTypeMismatch {
        node: NodeId,
        key: String,
        expected: ValueType,
    },

    #[error("Invalid page path '{0}': paths must begin with '/'")]
    InvalidPagePath(String),
}

/// Validates the structural invariants of `document`.
pub fn validate(document: &PageDocument) -> Result<(), ValidationError> {
    // node id -> the zone holding it (None for top-level content)
    let mut placement: HashMap<&NodeId, Option<&ZoneKey>> = HashMap::new();

    for node in &document.content {
        register(&mut placement, node, None)?;
    }
    for (key, nodes) in &document.zones {
        for node in nodes {
            register(&mut placement, node, Some(key))?;
        }
    }

    for key in document.zones.keys() {
        if !placement.contains_key(key.owner()) {
            return Err(ValidationError::UnknownZoneOwner {
                zone: key.clone(),
                owner: key.owner().clone(),
            });
        }
        check_rooted(&placement, key)?;
    }

    for node in document.nodes() {
        check_values(node)?;
    }

    Ok(())
}

fn register<'a>(
    placement: &mut HashMap<&'a NodeId, Option<&'a ZoneKey>>,
    node: &'a Node,
    zone: Option<&'a ZoneKey>,
) -> Result<(), ValidationError> {
    let id = node.id();
    if id.as_str().is_empty() {
        return Err(ValidationError::EmptyId(node.type_name()));
    }
    if placement.insert(id, zone).is_some() {
        return Err(ValidationError::DuplicateId(id.clone()));
    }
    Ok(())
}

/// Walks from the zone's owner up to a top-level node.
fn check_rooted(
    placement: &HashMap<&NodeId, Option<&ZoneKey>>,
    key: &ZoneKey,
) -> Result<(), ValidationError> {
    let mut visited = HashSet::new();
    let mut current = key.owner();
    loop {
        if !visited.insert(current) {
            return Err(ValidationError::ZoneCycle(key.clone()));
        }
        match placement.get(current) {
            Some(Some(parent_zone)) => current = parent_zone.owner(),
            Some(None) => return Ok(()),
            None => {
                return Err(ValidationError::UnknownZoneOwner {
                    zone: key.clone(),
                    owner: current.clone(),
                });
            }
        }
    }
}

fn check_values(node: &Node) -> Result<(), ValidationError> {
    let declared: HashMap<&str, ValueType> = node
        .properties()
        .iter()
        .map(|p| (p.key.as_str(), p.value_type))
        .collect();

    for (key, value) in node.values() {
        let Some(expected) = declared.get(key.as_str()) else {
            return Err(ValidationError::UndeclaredValue {
                node: node.id().clone(),
                key: key.clone(),
            });
        };
        if !expected.accepts(value) {
            return Err(ValidationError::ValueTypeMismatch {
                node: node.id().clone(),
                key: key.clone(),
                expected: *expected,
            });
        }
    }
    Ok(())
}
