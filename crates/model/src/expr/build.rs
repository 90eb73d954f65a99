//! Helpers for assembling expression trees in code.
//!
//! A programmatic front-end (and the test-suites) describe a predicate such as
//! `e -> e.getUser().getName().equals("Darek")` as
//! `param(0).get(user).get(name).equals(constant("Darek"))`.

use super::{Accessor, BinaryOp, Expr, Invocation, Lambda, LambdaParameter, Member, UnaryOp};
use crate::core::{data_type::TypeRef, value::Value};

pub fn param(index: usize) -> Expr {
    Expr::Parameter { index }
}

pub fn constant(value: impl Into<Value>) -> Expr {
    Expr::Constant(value.into())
}

impl Lambda {
    /// A single-slot predicate over `entity`.
    pub fn predicate(entity: TypeRef, body: Expr) -> Self {
        Self {
            parameters: vec![LambdaParameter {
                ty: entity,
                bound: None,
            }],
            body: Box::new(body),
        }
    }

    /// Appends a captured slot holding `value`.
    pub fn capture(mut self, ty: TypeRef, value: impl Into<Value>) -> Self {
        self.parameters.push(LambdaParameter {
            ty,
            bound: Some(value.into()),
        });
        self
    }
}

impl Accessor {
    pub fn getter(declaring_type: TypeRef, name: &str, return_type: TypeRef) -> Self {
        Self::method(declaring_type, name, Vec::new(), return_type)
    }

    pub fn method(
        declaring_type: TypeRef,
        name: &str,
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
    ) -> Self {
        Self {
            name: name.to_string(),
            declaring_type,
            parameters,
            return_type,
        }
    }

    pub fn equals(declaring_type: TypeRef) -> Self {
        Self::method(
            declaring_type,
            "equals",
            vec![TypeRef::Object],
            TypeRef::Boolean,
        )
    }

    /// One-argument method of the text type, e.g. `startsWith`.
    pub fn text(name: &str) -> Self {
        Self::method(TypeRef::Text, name, vec![TypeRef::Text], TypeRef::Boolean)
    }
}

impl Expr {
    /// `self.accessor()` with no arguments.
    pub fn get(self, accessor: Accessor) -> Expr {
        self.call(accessor, Vec::new())
    }

    pub fn call(self, accessor: Accessor, arguments: Vec<Expr>) -> Expr {
        Expr::Invocation(Invocation {
            target: Box::new(Expr::Member(Member {
                instance: Box::new(self),
                accessor,
            })),
            arguments,
        })
    }

    pub fn equals(self, other: Expr) -> Expr {
        let declaring = self.result_type().cloned().unwrap_or(TypeRef::Object);
        self.call(Accessor::equals(declaring), vec![other])
    }

    pub fn starts_with(self, pattern: Expr) -> Expr {
        self.call(Accessor::text("startsWith"), vec![pattern])
    }

    pub fn ends_with(self, pattern: Expr) -> Expr {
        self.call(Accessor::text("endsWith"), vec![pattern])
    }

    pub fn contains(self, pattern: Expr) -> Expr {
        self.call(Accessor::text("contains"), vec![pattern])
    }

    pub fn binary(self, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    pub fn equal(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Equal, right)
    }

    pub fn less_than(self, right: Expr) -> Expr {
        self.binary(BinaryOp::LessThan, right)
    }

    pub fn less_or_equal(self, right: Expr) -> Expr {
        self.binary(BinaryOp::LessOrEqual, right)
    }

    pub fn greater_than(self, right: Expr) -> Expr {
        self.binary(BinaryOp::GreaterThan, right)
    }

    pub fn greater_or_equal(self, right: Expr) -> Expr {
        self.binary(BinaryOp::GreaterOrEqual, right)
    }

    pub fn and(self, right: Expr) -> Expr {
        self.binary(BinaryOp::And, right)
    }

    pub fn or(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Or, right)
    }

    pub fn unary(self, op: UnaryOp) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(self),
        }
    }

    pub fn not(self) -> Expr {
        self.unary(UnaryOp::Not)
    }

    pub fn is_null(self) -> Expr {
        self.unary(UnaryOp::IsNull)
    }

    pub fn is_not_null(self) -> Expr {
        self.is_null().not()
    }

    pub fn convert(self) -> Expr {
        self.unary(UnaryOp::Convert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_name() -> Accessor {
        Accessor::getter(TypeRef::entity("UserModel"), "getName", TypeRef::Text)
    }

    #[test]
    fn test_get_wraps_member_in_invocation() {
        let expr = param(0).get(get_name());
        let Expr::Invocation(invocation) = &expr else {
            panic!("expected invocation, got {expr:?}");
        };
        assert!(invocation.arguments.is_empty());
        assert_eq!(expr.as_call().map(|m| m.accessor.name.as_str()), Some("getName"));
        assert_eq!(expr.result_type(), Some(&TypeRef::Text));
    }

    #[test]
    fn test_equals_uses_receiver_type() {
        let expr = param(0).get(get_name()).equals(constant("Darek"));
        let member = expr.as_call().unwrap();
        assert!(member.accessor.is_equals());
        assert_eq!(member.accessor.declaring_type, TypeRef::Text);
    }

    #[test]
    fn test_captured_slots_form_root_scope() {
        let lambda = Lambda::predicate(TypeRef::entity("UserModel"), param(1))
            .capture(TypeRef::Text, "anna");
        assert!(lambda.is_entity_slot(0));
        assert!(!lambda.is_entity_slot(1));
        assert_eq!(lambda.root_scope(), vec![Value::Null, Value::from("anna")]);
    }

    #[test]
    fn test_property_name_follows_bean_convention() {
        let getter = |name: &str| Accessor::getter(TypeRef::entity("OrderModel"), name, TypeRef::Text);
        assert_eq!(getter("getDeliveryAddress").property_name().as_deref(), Some("deliveryAddress"));
        assert_eq!(getter("isActive").property_name().as_deref(), Some("active"));
        assert_eq!(getter("getA").property_name().as_deref(), Some("a"));
        assert_eq!(getter("get").property_name(), None);
        assert_eq!(getter("getter").property_name(), None);
        assert_eq!(Accessor::text("startsWith").property_name(), None);
    }

    #[test]
    fn test_operator_names_parse() {
        assert_eq!("LogicalAnd".parse::<BinaryOp>(), Ok(BinaryOp::And));
        assert_eq!("GreaterThanOrEqual".parse::<BinaryOp>(), Ok(BinaryOp::GreaterOrEqual));
        assert!("Add".parse::<BinaryOp>().is_err());
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
    }
}
