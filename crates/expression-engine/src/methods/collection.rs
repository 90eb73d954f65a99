use super::arg;
use crate::error::{ExpressionError, Result};
use model::core::value::Value;

fn invalid(method: &str, message: String) -> ExpressionError {
    ExpressionError::InvalidArguments {
        method: method.to_string(),
        message,
    }
}

/// Map keys are text; non-text keys are looked up by their text form.
fn map_key(key: &Value) -> String {
    key.to_string()
}

/// Entry for the key, `Null` when absent
pub fn map_get(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::Map(map) = receiver else {
        return Err(invalid("get", format!("expected Map, got {}", receiver.kind())));
    };
    let key = arg(args, 0, "get")?;
    Ok(map.get(&map_key(key)).cloned().unwrap_or(Value::Null))
}

pub fn map_get_or_default(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::Map(map) = receiver else {
        return Err(invalid(
            "getOrDefault",
            format!("expected Map, got {}", receiver.kind()),
        ));
    };
    let key = arg(args, 0, "getOrDefault")?;
    let default = arg(args, 1, "getOrDefault")?;
    Ok(map.get(&map_key(key)).cloned().unwrap_or_else(|| default.clone()))
}

pub fn map_contains_key(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::Map(map) = receiver else {
        return Err(invalid(
            "containsKey",
            format!("expected Map, got {}", receiver.kind()),
        ));
    };
    let key = arg(args, 0, "containsKey")?;
    Ok(Value::Boolean(map.contains_key(&map_key(key))))
}

/// Element at the index; out of range is an error
pub fn list_get(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::List(items) = receiver else {
        return Err(invalid("get", format!("expected List, got {}", receiver.kind())));
    };
    let index = arg(args, 0, "get")?;
    let position = index
        .as_i64()
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| invalid("get", format!("invalid index {index}")))?;
    items
        .get(position)
        .cloned()
        .ok_or_else(|| invalid("get", format!("index {position} out of bounds for length {}", items.len())))
}

pub fn list_contains(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::List(items) = receiver else {
        return Err(invalid(
            "contains",
            format!("expected List, got {}", receiver.kind()),
        ));
    };
    let needle = arg(args, 0, "contains")?;
    Ok(Value::Boolean(items.contains(needle)))
}

pub fn size(receiver: &Value, _args: &[Value]) -> Result<Value> {
    match receiver {
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        Value::Map(map) => Ok(Value::Int(map.len() as i64)),
        other => Err(invalid("size", format!("expected collection, got {}", other.kind()))),
    }
}

pub fn is_empty(receiver: &Value, _args: &[Value]) -> Result<Value> {
    match receiver {
        Value::List(items) => Ok(Value::Boolean(items.is_empty())),
        Value::Map(map) => Ok(Value::Boolean(map.is_empty())),
        other => Err(invalid("isEmpty", format!("expected collection, got {}", other.kind()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn map(entries: &[(&str, &str)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), Value::from(*v)))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_map_lookups() {
        let value = map(&[("key", "value")]);
        assert_eq!(map_get(&value, &[Value::from("key")]).unwrap(), Value::from("value"));
        assert_eq!(map_get(&value, &[Value::from("missing")]).unwrap(), Value::Null);
        assert_eq!(
            map_get_or_default(&value, &[Value::from("missing"), Value::from("x")]).unwrap(),
            Value::from("x")
        );
        assert_eq!(
            map_contains_key(&value, &[Value::from("key")]).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_list_access() {
        let list = Value::List(vec![Value::Int(10), Value::Int(20)]);
        assert_eq!(list_get(&list, &[Value::Int(1)]).unwrap(), Value::Int(20));
        assert!(list_get(&list, &[Value::Int(2)]).is_err());
        assert!(list_get(&list, &[Value::Int(-1)]).is_err());
        assert_eq!(list_contains(&list, &[Value::Int(10)]).unwrap(), Value::Boolean(true));
        assert_eq!(size(&list, &[]).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_size_of_scalar_fails() {
        assert!(size(&Value::Int(3), &[]).is_err());
        assert_eq!(is_empty(&map(&[]), &[]).unwrap(), Value::Boolean(true));
    }
}
