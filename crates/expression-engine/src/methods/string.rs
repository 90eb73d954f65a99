use super::arg;
use crate::error::{ExpressionError, Result};
use model::core::value::Value;

fn receiver_str<'a>(receiver: &'a Value, method: &str) -> Result<&'a str> {
    receiver
        .as_str()
        .ok_or_else(|| ExpressionError::InvalidArguments {
            method: method.to_string(),
            message: format!("expected String receiver, got {}", receiver.kind()),
        })
}

fn arg_str<'a>(args: &'a [Value], index: usize, method: &str) -> Result<&'a str> {
    let value = arg(args, index, method)?;
    value
        .as_str()
        .ok_or_else(|| ExpressionError::InvalidArguments {
            method: method.to_string(),
            message: format!("expected String argument, got {}", value.kind()),
        })
}

pub fn to_upper_case(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::String(receiver_str(receiver, "toUpperCase")?.to_uppercase()))
}

pub fn to_lower_case(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::String(receiver_str(receiver, "toLowerCase")?.to_lowercase()))
}

pub fn trim(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::String(receiver_str(receiver, "trim")?.trim().to_string()))
}

/// Length in characters
pub fn length(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::Int(receiver_str(receiver, "length")?.chars().count() as i64))
}

pub fn is_empty(receiver: &Value, _args: &[Value]) -> Result<Value> {
    Ok(Value::Boolean(receiver_str(receiver, "isEmpty")?.is_empty()))
}

/// Appends the text form of the argument
pub fn concat(receiver: &Value, args: &[Value]) -> Result<Value> {
    let head = receiver_str(receiver, "concat")?;
    let tail = arg(args, 0, "concat")?;
    Ok(Value::String(format!("{head}{tail}")))
}

pub fn starts_with(receiver: &Value, args: &[Value]) -> Result<Value> {
    let text = receiver_str(receiver, "startsWith")?;
    Ok(Value::Boolean(text.starts_with(arg_str(args, 0, "startsWith")?)))
}

pub fn ends_with(receiver: &Value, args: &[Value]) -> Result<Value> {
    let text = receiver_str(receiver, "endsWith")?;
    Ok(Value::Boolean(text.ends_with(arg_str(args, 0, "endsWith")?)))
}

pub fn contains(receiver: &Value, args: &[Value]) -> Result<Value> {
    let text = receiver_str(receiver, "contains")?;
    Ok(Value::Boolean(text.contains(arg_str(args, 0, "contains")?)))
}
