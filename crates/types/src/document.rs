use crate::ids::{NodeId, ZoneKey};
use crate::node::Node;
use crate::validate::{ValidationError, validate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A social-preview image attached to the page root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OgImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Page-level metadata (title and SEO fields).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub og_images: Vec<OgImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    #[serde(default)]
    pub props: RootProps,
}

/// A fully-resolved page: top-level nodes plus nested zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub root: RootData,
    #[serde(default)]
    pub content: Vec<Node>,
    #[serde(default)]
    pub zones: BTreeMap<ZoneKey, Vec<Node>>,
}

impl PageDocument {
    /// Parses a document from JSON text and validates its structure.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let document: PageDocument = serde_json::from_str(json)?;
        validate(&document)?;
        Ok(document)
    }

    /// Same as [`PageDocument::from_json`], for an already-parsed value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let document: PageDocument = serde_json::from_value(value)?;
        validate(&document)?;
        Ok(document)
    }

    /// Checks the structural invariants (unique ids, zone ownership, no cycles).
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// All nodes of the document, top-level first, then zone by zone.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.content
            .iter()
            .chain(self.zones.values().flat_map(|nodes| nodes.iter()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.nodes().find(|node| node.id() == id)
    }

    /// The ordered children stored under `key`, if that zone exists.
    pub fn zone(&self, key: &ZoneKey) -> Option<&[Node]> {
        self.zones.get(key).map(Vec::as_slice)
    }

    /// The page title, if one is set.
    pub fn title(&self) -> Option<&str> {
        self.root.props.title.as_deref()
    }
}
