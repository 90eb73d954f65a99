pub mod collection;
pub mod object;
pub mod string;

use crate::{
    call::DynamicCall,
    error::{ExpressionError, Result},
};
use model::{core::value::Value, expr::Accessor};
use std::collections::HashMap;
use tracing::trace;

/// Type alias for built-in method implementations
pub type MethodImpl = fn(&Value, &[Value]) -> Result<Value>;

/// Receiver families that built-in methods are registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    Any,
    String,
    Map,
    List,
    Entity,
}

impl ReceiverKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ReceiverKind::String,
            Value::Map(_) => ReceiverKind::Map,
            Value::List(_) => ReceiverKind::List,
            Value::Entity(_) => ReceiverKind::Entity,
            _ => ReceiverKind::Any,
        }
    }
}

/// Registry of methods the constant folder may call on captured values.
///
/// Dispatch keys on the runtime kind of the receiver value; the accessor's
/// `declaring_type` is not consulted.
///
/// Lookups go from the receiver's own kind to [`ReceiverKind::Any`]; entity
/// receivers additionally answer bean getters from their attributes, and
/// opaque objects answer every call through their own `invoke`.
pub struct MethodRegistry {
    methods: HashMap<(ReceiverKind, String), MethodImpl>,
}

impl MethodRegistry {
    /// Create a new method registry with all built-in methods
    pub fn new() -> Self {
        let mut registry = Self {
            methods: HashMap::new(),
        };

        registry.register(ReceiverKind::Any, "toString", object::to_string);
        registry.register(ReceiverKind::Any, "equals", object::equals);
        registry.register(ReceiverKind::Any, "compareTo", object::compare_to);

        registry.register(ReceiverKind::String, "toUpperCase", string::to_upper_case);
        registry.register(ReceiverKind::String, "toLowerCase", string::to_lower_case);
        registry.register(ReceiverKind::String, "trim", string::trim);
        registry.register(ReceiverKind::String, "length", string::length);
        registry.register(ReceiverKind::String, "isEmpty", string::is_empty);
        registry.register(ReceiverKind::String, "concat", string::concat);
        registry.register(ReceiverKind::String, "startsWith", string::starts_with);
        registry.register(ReceiverKind::String, "endsWith", string::ends_with);
        registry.register(ReceiverKind::String, "contains", string::contains);

        registry.register(ReceiverKind::Map, "get", collection::map_get);
        registry.register(ReceiverKind::Map, "getOrDefault", collection::map_get_or_default);
        registry.register(ReceiverKind::Map, "containsKey", collection::map_contains_key);
        registry.register(ReceiverKind::Map, "size", collection::size);
        registry.register(ReceiverKind::Map, "isEmpty", collection::is_empty);

        registry.register(ReceiverKind::List, "get", collection::list_get);
        registry.register(ReceiverKind::List, "contains", collection::list_contains);
        registry.register(ReceiverKind::List, "size", collection::size);
        registry.register(ReceiverKind::List, "isEmpty", collection::is_empty);

        registry.register(ReceiverKind::Entity, "getPk", object::entity_pk);

        registry
    }

    pub fn register(&mut self, kind: ReceiverKind, name: &str, method: MethodImpl) {
        self.methods.insert((kind, name.to_string()), method);
    }

    pub fn has_method(&self, kind: ReceiverKind, name: &str) -> bool {
        self.lookup(kind, name).is_some()
    }

    fn lookup(&self, kind: ReceiverKind, name: &str) -> Option<MethodImpl> {
        self.methods
            .get(&(kind, name.to_string()))
            .or_else(|| self.methods.get(&(ReceiverKind::Any, name.to_string())))
            .copied()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicCall for MethodRegistry {
    fn call(&self, receiver: &Value, accessor: &Accessor, args: &[Value]) -> Result<Value> {
        let method = accessor.name.as_str();
        trace!(receiver = receiver.kind(), method, "dynamic call");

        match receiver {
            Value::Null => Err(ExpressionError::NullReceiver {
                method: accessor.to_string(),
            }),
            Value::Object(object) => object::invoke(object, method, args),
            _ => {
                let kind = ReceiverKind::of(receiver);
                if let Some(builtin) = self.lookup(kind, method) {
                    return builtin(receiver, args);
                }
                if let Value::Entity(entity) = receiver
                    && let Some(property) = accessor.property_name()
                {
                    return object::entity_property(entity, &property);
                }
                Err(ExpressionError::UnsupportedMember(format!(
                    "{accessor} on {}",
                    receiver.kind()
                )))
            }
        }
    }
}

/// Argument `index`, or an arity error naming `method`.
pub(crate) fn arg<'a>(args: &'a [Value], index: usize, method: &str) -> Result<&'a Value> {
    args.get(index)
        .ok_or_else(|| ExpressionError::InvalidArguments {
            method: method.to_string(),
            message: format!("missing argument #{index}"),
        })
}
