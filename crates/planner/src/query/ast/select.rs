//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::query::ast::{
    common::{JoinKind, TableRef},
    expr::{Expr, PropertyRef},
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of properties to be returned.
    /// e.g., `{this.PK}`
    pub columns: Vec<Expr>,

    /// The root item type of the query.
    /// e.g., `FROM {Order AS this}`
    pub from: Option<FromClause>,

    /// JOIN clauses, rendered inside the FROM block in insertion order.
    pub joins: Vec<JoinClause>,

    /// WHERE conditions; each one is grouped and the groups are AND-joined.
    pub conditions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table: TableRef,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: TableRef,
    pub alias: String,
    /// The join condition, e.g., `ON {this.user}={thisuser.PK}`.
    pub on: JoinCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinCondition {
    pub left: PropertyRef,
    pub right: PropertyRef,
}
