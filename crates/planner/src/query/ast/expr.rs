//! Defines the AST for query expressions.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A qualified property reference, e.g. `{this.user}`.
    Property(PropertyRef),

    /// Text produced by the predicate compiler, emitted as is.
    Raw(String),

    /// A parenthesized expression, e.g. `({this.code} = ?a)`.
    Grouped(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub qualifier: String, // e.g., the 'this' in '{this.user}'
    pub name: String,      // e.g., the 'user' in '{this.user}'
}
