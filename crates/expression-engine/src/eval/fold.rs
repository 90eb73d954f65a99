use crate::{
    call::DynamicCall,
    context::EvalScope,
    error::{ExpressionError, Result},
};
use model::{
    core::value::Value,
    expr::{Expr, Member, UnaryOp},
};
use std::collections::BTreeSet;
use tracing::trace;

/// Reduces a sub-tree that does not touch the entity to a single value.
///
/// Parameters resolve against the active [`EvalScope`]; member calls go
/// through the supplied [`DynamicCall`]. An invocation whose arguments do not
/// match its member's parameters folds the member under a scope made of
/// those arguments, so the receiver may read them. Comparison and logical operators are
/// not folded: they belong to the query, not to the caller.
pub struct ConstantFolder<'a> {
    calls: &'a dyn DynamicCall,
    scope: EvalScope,
}

impl<'a> ConstantFolder<'a> {
    pub fn new(calls: &'a dyn DynamicCall, root: Vec<Value>) -> Self {
        Self {
            calls,
            scope: EvalScope::new(root),
        }
    }

    /// Root slots read by every fold so far.
    pub fn consumed(&self) -> &BTreeSet<usize> {
        self.scope.consumed()
    }

    pub fn fold(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Parameter { index } => self.scope.get(*index),
            Expr::Member(member) => self.call_member(member, Vec::new()),
            Expr::Invocation(invocation) => {
                let args = invocation
                    .arguments
                    .iter()
                    .map(|arg| self.fold(arg))
                    .collect::<Result<Vec<_>>>()?;

                match invocation.target.as_ref() {
                    // `receiver.method(args)`: the arguments fill the method's parameters
                    Expr::Member(member) if member.accessor.parameters.len() == args.len() => {
                        self.call_member(member, args)
                    }
                    target => {
                        self.scope.push(args);
                        let result = self.fold(target);
                        self.scope.pop();
                        result
                    }
                }
            }
            Expr::Lambda(lambda) => self.fold(&lambda.body),
            Expr::Unary {
                op: UnaryOp::Convert,
                operand,
            } => self.fold(operand),
            other => Err(ExpressionError::Unsupported(other.describe())),
        }
    }

    fn call_member(&mut self, member: &Member, args: Vec<Value>) -> Result<Value> {
        let accessor = &member.accessor;
        if args.len() != accessor.parameters.len() {
            return Err(ExpressionError::InvalidArguments {
                method: accessor.to_string(),
                message: format!(
                    "expected {} argument(s), got {}",
                    accessor.parameters.len(),
                    args.len()
                ),
            });
        }

        let receiver = self.fold(&member.instance)?;
        let result = self.calls.call(&receiver, accessor, &args)?;
        trace!(method = %accessor, result = %result, "folded call");
        Ok(result)
    }
}
