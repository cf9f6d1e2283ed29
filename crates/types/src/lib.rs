//! Page document model shared by the pipeline, the page store and the editor.

pub mod document;
pub mod ids;
pub mod node;
pub mod validate;

pub use document::{OgImage, PageDocument, RootData, RootProps};
pub use ids::{DEFAULT_ZONE, NodeId, PagePath, ZoneKey};
pub use node::{
    BaseProps, ButtonProps, ButtonSize, ButtonVariant, CardProps, ChildrenSpec, CollisionAxis,
    ContainerProps, DropZoneProps, Node, PropertyDecl, TypographyProps, TypographyVariant,
    ValueType,
};
pub use validate::{ValidationError, validate};
