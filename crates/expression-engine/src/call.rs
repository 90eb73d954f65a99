use crate::error::Result;
use model::{core::value::Value, expr::Accessor};

/// The only way folding reaches caller code: invoke `accessor` on an already
/// evaluated receiver with already evaluated arguments.
pub trait DynamicCall: Send + Sync {
    fn call(&self, receiver: &Value, accessor: &Accessor, args: &[Value]) -> Result<Value>;
}
