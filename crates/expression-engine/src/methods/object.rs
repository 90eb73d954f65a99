use super::arg;
use crate::error::{ExpressionError, Result};
use model::core::value::{EntityRef, ObjectRef, Value};
use std::{
    cmp::Ordering,
    panic::{self, AssertUnwindSafe},
};

/// Text form of any receiver
pub fn to_string(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::String(receiver.to_string()))
}

/// Value equality of receiver and argument
pub fn equals(receiver: &Value, args: &[Value]) -> Result<Value> {
    let other = arg(args, 0, "equals")?;
    Ok(Value::Boolean(receiver == other))
}

/// Three-way comparison as -1, 0 or 1
pub fn compare_to(receiver: &Value, args: &[Value]) -> Result<Value> {
    let other = arg(args, 0, "compareTo")?;
    let ordering = receiver
        .compare(other)
        .ok_or_else(|| ExpressionError::InvalidArguments {
            method: "compareTo".to_string(),
            message: format!("cannot compare {} with {}", receiver.kind(), other.kind()),
        })?;
    Ok(Value::Int(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }))
}

/// Primary key of a captured item
pub fn entity_pk(receiver: &Value, _args: &[Value]) -> Result<Value> {
    match receiver {
        Value::Entity(entity) => Ok(Value::Int(entity.pk as i64)),
        other => Err(ExpressionError::InvalidArguments {
            method: "getPk".to_string(),
            message: format!("expected entity, got {}", other.kind()),
        }),
    }
}

pub fn entity_property(entity: &EntityRef, property: &str) -> Result<Value> {
    entity.attributes.get(property).cloned().ok_or_else(|| {
        ExpressionError::UnsupportedMember(format!(
            "{} has no attribute `{property}`",
            entity.type_name
        ))
    })
}

/// Runs caller code; errors and panics both come back as evaluation errors.
pub fn invoke(object: &ObjectRef, method: &str, args: &[Value]) -> Result<Value> {
    match panic::catch_unwind(AssertUnwindSafe(|| object.invoke(method, args))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(ExpressionError::Invocation {
            method: format!("{}::{method}", object.type_name()),
            source,
        }),
        Err(_) => Err(ExpressionError::Panicked {
            method: format!("{}::{method}", object.type_name()),
        }),
    }
}
