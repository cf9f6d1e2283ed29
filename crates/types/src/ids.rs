//! Newtype wrappers for node identifiers, zone keys and page paths
//!
//! These types keep the different kinds of string keys in a page document
//! apart at compile time (a zone key is not a node id, a page path is not a
//! zone key).

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// The zone name used when a nested node does not name its slot.
pub const DEFAULT_ZONE: &str = "children";

/// A document-wide unique node identifier (`props.id`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Creates a new NodeId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this node ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The composite key `{nodeId}:{zoneName}` identifying one zone.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ZoneKey {
    owner: NodeId,
    zone: Arc<str>,
}

impl ZoneKey {
    /// Builds a zone key from its owner and zone name.
    pub fn new(owner: NodeId, zone: impl Into<Arc<str>>) -> Self {
        Self {
            owner,
            zone: zone.into(),
        }
    }

    /// Parses `{nodeId}:{zoneName}`, splitting at the first colon. Node ids
    /// never contain a colon; zone names may. Both halves must be non-empty.
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        match key.split_once(':') {
            Some((owner, zone)) if !owner.is_empty() && !zone.is_empty() => {
                Ok(Self::new(NodeId::from(owner), zone))
            }
            _ => Err(ValidationError::MalformedZoneKey(key.to_string())),
        }
    }

    /// The node owning this zone.
    pub fn owner(&self) -> &NodeId {
        &self.owner
    }

    /// The zone (slot) name.
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.zone)
    }
}

impl Serialize for ZoneKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ZoneKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ZoneKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A page-store key: a URL path beginning with `/`. `/` is the home page.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PagePath(Arc<str>);

impl PagePath {
    /// Validates and wraps a URL path.
    pub fn new(path: impl Into<Arc<str>>) -> Result<Self, ValidationError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(ValidationError::InvalidPagePath(path.to_string()));
        }
        Ok(Self(path))
    }

    /// The home page path, `/`.
    pub fn home() -> Self {
        Self("/".into())
    }

    /// Returns the string representation of this path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, e.g. `["blog", "post"]` for `/blog/post`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl TryFrom<&str> for PagePath {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for PagePath {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for PagePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PagePath::new(raw).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for PagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
