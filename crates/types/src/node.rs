//! Node variants of a page document.
//!
//! A node is serialized as `{"type": "...", "props": {...}}`. The `type` tag
//! selects one of a closed set of component schemas; each variant carries its
//! own prop shape.

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The declared type of a node attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Json,
    Function,
}

impl ValueType {
    /// Whether `value` is acceptable for this type.
    ///
    /// Generated documents carry every value as a string and leave parsing to
    /// the renderer, so numeric and boolean strings are accepted too.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::String | ValueType::Function => value.is_string(),
            ValueType::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            ValueType::Boolean => matches!(value, Value::Bool(_))
                || matches!(value.as_str(), Some("true") | Some("false")),
            ValueType::Json => true,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Json => "json",
            ValueType::Function => "function",
        };
        f.write_str(name)
    }
}

/// One entry of a node's typed attribute schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub key: String,
    pub value_type: ValueType,
}

/// Drop axis used by the editor when a dragged node collides with siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionAxis {
    X,
    Y,
    Dynamic,
}

/// Configuration of a node that accepts nested children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropZoneProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_empty_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision_axis: Option<CollisionAxis>,
}

/// What a base node renders inside its element.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildrenSpec {
    /// A void element such as `img`.
    None,
    /// Literal text content.
    Text { value: String },
    /// Nested children, stored in a zone of this node.
    Dropzone(DropZoneProps),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChildrenKind {
    None,
    Text,
    Dropzone,
}

/// Props of the intrinsic-element wrapper (`type: "base"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBaseProps", into = "RawBaseProps")]
pub struct BaseProps {
    pub id: NodeId,
    pub element: String,
    pub children: ChildrenSpec,
    pub properties: Vec<PropertyDecl>,
    pub values: Map<String, Value>,
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBaseProps {
    id: NodeId,
    element: String,
    children: ChildrenKind,
    #[serde(default)]
    children_props: Value,
    #[serde(default)]
    properties: Vec<PropertyDecl>,
    #[serde(default)]
    values: Map<String, Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawBaseProps> for BaseProps {
    type Error = String;

    fn try_from(raw: RawBaseProps) -> Result<Self, Self::Error> {
        let children = match raw.children {
            ChildrenKind::None => ChildrenSpec::None,
            ChildrenKind::Text => {
                let value = raw
                    .children_props
                    .get("value")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        format!(
                            "node '{}' has text children but no childrenProps.value string",
                            raw.id
                        )
                    })?;
                ChildrenSpec::Text {
                    value: value.to_string(),
                }
            }
            ChildrenKind::Dropzone => {
                let props = if raw.children_props.is_null() {
                    DropZoneProps::default()
                } else {
                    serde_json::from_value(raw.children_props).map_err(|e| {
                        format!("node '{}' has invalid dropzone childrenProps: {}", raw.id, e)
                    })?
                };
                ChildrenSpec::Dropzone(props)
            }
        };

        Ok(BaseProps {
            id: raw.id,
            element: raw.element,
            children,
            properties: raw.properties,
            values: raw.values,
            extra: raw.extra,
        })
    }
}

impl From<BaseProps> for RawBaseProps {
    fn from(props: BaseProps) -> Self {
        let (children, children_props) = match props.children {
            ChildrenSpec::None => (ChildrenKind::None, Value::Object(Map::new())),
            ChildrenSpec::Text { value } => {
                let mut payload = Map::new();
                payload.insert("value".to_string(), Value::String(value));
                (ChildrenKind::Text, Value::Object(payload))
            }
            ChildrenSpec::Dropzone(dropzone) => (
                ChildrenKind::Dropzone,
                serde_json::to_value(dropzone).unwrap_or_else(|_| Value::Object(Map::new())),
            ),
        };

        RawBaseProps {
            id: props.id,
            element: props.element,
            children,
            children_props,
            properties: props.properties,
            values: props.values,
            extra: props.extra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Default,
    Sm,
    Lg,
    Icon,
}

/// Props of `type: "button"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonProps {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ButtonVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ButtonSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_child: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props of `type: "card"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypographyVariant {
    H1,
    H2,
    H3,
    H4,
    P,
    Blockquote,
    Lead,
    Large,
    Small,
    Muted,
    Code,
}

/// Props of `type: "typography"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyProps {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<TypographyVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props of `type: "container"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProps {
    pub id: NodeId,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One addressable content element of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "lowercase")]
pub enum Node {
    Base(BaseProps),
    Button(ButtonProps),
    Card(CardProps),
    Typography(TypographyProps),
    Container(ContainerProps),
}

impl Node {
    /// The node's document-wide identifier.
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Base(p) => &p.id,
            Node::Button(p) => &p.id,
            Node::Card(p) => &p.id,
            Node::Typography(p) => &p.id,
            Node::Container(p) => &p.id,
        }
    }

    /// The `type` tag this node serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Base(_) => "base",
            Node::Button(_) => "button",
            Node::Card(_) => "card",
            Node::Typography(_) => "typography",
            Node::Container(_) => "container",
        }
    }

    /// The declared attribute schema.
    pub fn properties(&self) -> &[PropertyDecl] {
        match self {
            Node::Base(p) => &p.properties,
            Node::Button(p) => &p.properties,
            Node::Card(p) => &p.properties,
            Node::Typography(p) => &p.properties,
            Node::Container(p) => &p.properties,
        }
    }

    /// The attribute values, keyed by property key.
    pub fn values(&self) -> &Map<String, Value> {
        match self {
            Node::Base(p) => &p.values,
            Node::Button(p) => &p.values,
            Node::Card(p) => &p.values,
            Node::Typography(p) => &p.values,
            Node::Container(p) => &p.values,
        }
    }

    /// True for base nodes whose children live in a zone.
    pub fn accepts_children(&self) -> bool {
        matches!(
            self,
            Node::Base(BaseProps {
                children: ChildrenSpec::Dropzone(_),
                ..
            })
        )
    }
}
