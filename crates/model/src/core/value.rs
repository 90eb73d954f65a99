use crate::core::identifiers::EntityType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeMap, error::Error, fmt, sync::Arc};
use uuid::Uuid;

/// Literal value known at compile time: a constant from the tree, a captured
/// variable, or the result of folding a captured sub-expression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Entity(EntityRef),
    #[serde(skip)]
    Object(ObjectRef),
    Null,
}

/// A persisted item captured by the caller, e.g. the `user` in `e.getUser().equals(user)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityRef {
    pub type_name: EntityType,
    pub pk: u64,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl EntityRef {
    pub fn new(type_name: impl Into<EntityType>, pk: u64) -> Self {
        Self {
            type_name: type_name.into(),
            pk,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }
}

pub type InvocationError = Box<dyn Error + Send + Sync>;

/// Caller code reachable from a predicate: captured builders, lookups, services.
pub trait Invocable: Send + Sync {
    fn type_name(&self) -> &str;

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, InvocationError>;
}

#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Invocable>);

impl ObjectRef {
    pub fn new(object: impl Invocable + 'static) -> Self {
        Self(Arc::new(object))
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, InvocationError> {
        self.0.invoke(method, args)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_name()).finish()
    }
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Json(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::String(v) => v.parse::<i64>().ok(),
            Value::Json(v) => v.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            Value::Json(v) => v.as_bool(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name used in error messages and method dispatch.
    pub fn kind(&self) -> &str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Uuid(_) => "Uuid",
            Value::Date(_) => "Date",
            Value::Timestamp(_) => "Timestamp",
            Value::Json(_) => "Json",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Entity(entity) => entity.type_name.as_str(),
            Value::Object(object) => object.type_name(),
            Value::Null => "Null",
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<EntityRef> for Value {
    fn from(v: EntityRef) -> Self {
        Value::Entity(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

/// Text form of a value, as the caller's `toString` would produce it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Timestamp(v) => f.write_str(&v.to_rfc3339()),
            Value::Json(v) => write!(f, "{v}"),
            Value::List(items) => {
                let items = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{items}]")
            }
            Value::Map(entries) => {
                let entries = entries
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{entries}}}")
            }
            Value::Entity(entity) => write!(f, "{}#{}", entity.type_name, entity.pk),
            Value::Object(object) => write!(f, "<{}>", object.type_name()),
            Value::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    impl Invocable for Counter {
        fn type_name(&self) -> &str {
            "Counter"
        }

        fn invoke(&self, _method: &str, _args: &[Value]) -> Result<Value, InvocationError> {
            Ok(Value::Int(1))
        }
    }

    #[test]
    fn test_object_equality_is_identity() {
        let a = ObjectRef::new(Counter);
        let b = ObjectRef::new(Counter);
        assert_eq!(Value::Object(a.clone()), Value::Object(a.clone()));
        assert_ne!(Value::Object(a), Value::Object(b));
    }

    #[test]
    fn test_display_matches_to_string_semantics() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Null.to_string(), "null");
        let entity = EntityRef::new("UserModel", 42);
        assert_eq!(Value::from(entity).to_string(), "UserModel#42");
    }

    #[test]
    fn test_entity_ref_serde_round_trip_keeps_attributes() {
        let entity = EntityRef::new("UserModel", 7).with_attribute("uid", "anna");
        let json = serde_json::to_string(&Value::Entity(entity.clone())).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::Entity(entity));
    }

    #[test]
    fn test_object_values_are_not_serializable() {
        let value = Value::Object(ObjectRef::new(Counter));
        assert!(serde_json::to_string(&value).is_err());
    }
}
