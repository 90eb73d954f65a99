use crate::error::{ExpressionError, Result};
use model::core::value::Value;
use std::collections::BTreeSet;

/// Parameter scopes visible while folding.
///
/// The root scope holds the lambda's slots; nested scopes are pushed for the
/// arguments of invoked lambda-like targets and popped when the target is done.
#[derive(Debug, Clone)]
pub struct EvalScope {
    scopes: Vec<Vec<Value>>,
    consumed: BTreeSet<usize>,
}

impl EvalScope {
    pub fn new(root: Vec<Value>) -> Self {
        Self {
            scopes: vec![root],
            consumed: BTreeSet::new(),
        }
    }

    pub fn push(&mut self, scope: Vec<Value>) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) {
        // the root scope is never popped
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Reads slot `index` of the innermost scope. Root-scope reads are recorded.
    pub fn get(&mut self, index: usize) -> Result<Value> {
        let is_root = self.depth() == 0;
        let value = self
            .scopes
            .last()
            .and_then(|scope| scope.get(index))
            .cloned()
            .ok_or(ExpressionError::UnboundParameter(index))?;
        if is_root {
            self.consumed.insert(index);
        }
        Ok(value)
    }

    /// Root slots read so far.
    pub fn consumed(&self) -> &BTreeSet<usize> {
        &self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_scope_shadows_root() {
        let mut scope = EvalScope::new(vec![Value::Int(1)]);
        scope.push(vec![Value::Int(2)]);
        assert_eq!(scope.get(0).unwrap(), Value::Int(2));
        assert!(scope.consumed().is_empty());

        scope.pop();
        assert_eq!(scope.get(0).unwrap(), Value::Int(1));
        assert_eq!(scope.consumed().iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_root_scope_survives_extra_pop() {
        let mut scope = EvalScope::new(vec![Value::Null]);
        scope.pop();
        assert_eq!(scope.depth(), 0);
        assert!(matches!(
            scope.get(3),
            Err(ExpressionError::UnboundParameter(3))
        ));
    }
}
