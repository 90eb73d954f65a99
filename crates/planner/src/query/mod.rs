use crate::query::ast::expr::{Expr, PropertyRef};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

/// `{qualifier.name}` reference.
pub fn property(qualifier: &str, name: &str) -> Expr {
    Expr::Property(PropertyRef {
        qualifier: qualifier.to_string(),
        name: name.to_string(),
    })
}

/// Already-compiled query text, emitted verbatim.
pub fn raw(text: impl Into<String>) -> Expr {
    Expr::Raw(text.into())
}
