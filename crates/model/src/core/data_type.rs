use crate::core::identifiers::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of an expression node as reported by the expression front-end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// An item type of the entity graph; reading it from another item is a relation hop.
    Entity(EntityType),
    /// The platform text type.
    Text,
    Boolean,
    Integer,
    Float,
    Date,
    Timestamp,
    /// The generic object type (`equals(Object)` takes one of these).
    Object,
    Collection,
    Other(String),
}

impl TypeRef {
    pub fn entity(name: impl Into<String>) -> Self {
        TypeRef::Entity(EntityType::new(name))
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, TypeRef::Entity(_))
    }

    pub fn as_entity(&self) -> Option<&EntityType> {
        match self {
            TypeRef::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeRef::Boolean)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, TypeRef::Text)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Entity(entity) => write!(f, "{entity}"),
            TypeRef::Text => f.write_str("Text"),
            TypeRef::Boolean => f.write_str("Boolean"),
            TypeRef::Integer => f.write_str("Integer"),
            TypeRef::Float => f.write_str("Float"),
            TypeRef::Date => f.write_str("Date"),
            TypeRef::Timestamp => f.write_str("Timestamp"),
            TypeRef::Object => f.write_str("Object"),
            TypeRef::Collection => f.write_str("Collection"),
            TypeRef::Other(name) => f.write_str(name),
        }
    }
}
