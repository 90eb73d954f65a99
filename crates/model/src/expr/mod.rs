//! Typed expression tree produced by the expression front-end.
//!
//! The tree is the input of the query compiler: a predicate lambda whose body
//! reads properties of the entity under match and compares them with values
//! known at tree-construction time.

use crate::core::{data_type::TypeRef, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub mod build;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Expr {
    Lambda(Lambda),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Member(Member),
    Invocation(Invocation),
    Constant(Value),
    /// Reads slot `index` of the evaluation scope active when the node is visited.
    Parameter {
        index: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lambda {
    pub parameters: Vec<LambdaParameter>,
    pub body: Box<Expr>,
}

/// A lambda slot. Unbound slots stand for the entity under match; bound slots
/// hold values captured by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LambdaParameter {
    pub ty: TypeRef,
    #[serde(default)]
    pub bound: Option<Value>,
}

/// A property getter or other method read off `instance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub instance: Box<Expr>,
    pub accessor: Accessor,
}

/// A call whose callee is `target`, normally a [`Member`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invocation {
    pub target: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Accessor {
    pub name: String,
    pub declaring_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Equal,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    And,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    IsNull,
    /// Type coercion or boxing cast; invisible to the query.
    Convert,
    Other(String),
}

impl Expr {
    /// Static result type of the node, when the tree carries one.
    pub fn result_type(&self) -> Option<&TypeRef> {
        match self {
            Expr::Member(member) => Some(&member.accessor.return_type),
            Expr::Invocation(invocation) => invocation.target.result_type(),
            Expr::Unary {
                op: UnaryOp::Convert,
                operand,
            } => operand.result_type(),
            Expr::Lambda(lambda) => lambda.body.result_type(),
            _ => None,
        }
    }

    /// The member a node calls: the node itself, or the target of an invocation.
    pub fn as_call(&self) -> Option<&Member> {
        match self {
            Expr::Member(member) => Some(member),
            Expr::Invocation(invocation) => match invocation.target.as_ref() {
                Expr::Member(member) => Some(member),
                _ => None,
            },
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Lambda(_) => "lambda".to_string(),
            Expr::Binary { op, .. } => format!("binary {op:?}"),
            Expr::Unary { op, .. } => format!("unary {op:?}"),
            Expr::Member(member) => format!("member {}", member.accessor),
            Expr::Invocation(invocation) => format!("invocation of {}", invocation.target.describe()),
            Expr::Constant(value) => format!("constant {value}"),
            Expr::Parameter { index } => format!("parameter #{index}"),
        }
    }
}

impl Lambda {
    /// True when slot `index` is the entity under match rather than a captured value.
    pub fn is_entity_slot(&self, index: usize) -> bool {
        self.parameters
            .get(index)
            .is_none_or(|parameter| parameter.bound.is_none())
    }

    /// Root evaluation scope: captured values, `Null` for entity slots.
    pub fn root_scope(&self) -> Vec<Value> {
        self.parameters
            .iter()
            .map(|parameter| parameter.bound.clone().unwrap_or(Value::Null))
            .collect()
    }
}

impl Accessor {
    pub fn is_equals(&self) -> bool {
        self.name == "equals" && self.parameters.len() == 1 && self.parameters[0] == TypeRef::Object
    }

    /// Bean property read by a getter: `getDeliveryAddress` -> `deliveryAddress`,
    /// `isActive` -> `active`. `None` for anything that is not a getter.
    pub fn property_name(&self) -> Option<String> {
        if !self.parameters.is_empty() {
            return None;
        }
        let rest = self
            .name
            .strip_prefix("get")
            .or_else(|| self.name.strip_prefix("is"))?;
        let mut chars = rest.chars();
        let first = chars.next().filter(|c| c.is_uppercase())?;
        Some(first.to_lowercase().chain(chars).collect())
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}::{}({})", self.declaring_type, self.name, parameters)
    }
}

impl BinaryOp {
    /// Binding strength in the target query language; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Equal
            | BinaryOp::LessThan
            | BinaryOp::LessOrEqual
            | BinaryOp::GreaterThan
            | BinaryOp::GreaterOrEqual => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operator `{0}`")]
pub struct UnknownOperator(pub String);

impl FromStr for BinaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Equal" => Ok(BinaryOp::Equal),
            "LessThan" => Ok(BinaryOp::LessThan),
            "LessOrEqual" | "LessThanOrEqual" => Ok(BinaryOp::LessOrEqual),
            "GreaterThan" => Ok(BinaryOp::GreaterThan),
            "GreaterOrEqual" | "GreaterThanOrEqual" => Ok(BinaryOp::GreaterOrEqual),
            "And" | "LogicalAnd" => Ok(BinaryOp::And),
            "Or" | "LogicalOr" => Ok(BinaryOp::Or),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}
