//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct query order at compile time.

use crate::query::ast::{
    common::TableRef,
    expr::Expr,
    select::{FromClause, JoinClause, Select},
};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns.
    /// This is the entry point for building a select query.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the root item type.
    pub fn from(mut self, table: TableRef, alias: &str) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.to_string(),
        });
        SelectBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add joins and conditions.
impl SelectBuilder<FromState> {
    /// Adds a `JOIN` clause unless an identical one is already present.
    pub fn join(mut self, join: JoinClause) -> Self {
        if !self.ast.joins.contains(&join) {
            self.ast.joins.push(join);
        }
        self
    }

    /// Adds a `WHERE` condition, AND-ed with the ones before it.
    pub fn and_where(mut self, condition: Expr) -> Self {
        self.ast.conditions.push(Expr::Grouped(Box::new(condition)));
        self
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        property_ref,
        query::{
            ast::{
                common::JoinKind,
                expr::Expr,
                select::{JoinClause, JoinCondition},
            },
            builder::select::SelectBuilder,
            property, raw,
        },
        table_ref,
    };

    fn join(table: &str, alias: &str, parent: &str, column: &str) -> JoinClause {
        JoinClause {
            kind: JoinKind::Left,
            table: table_ref!(table),
            alias: alias.to_string(),
            on: JoinCondition {
                left: property_ref!(parent, column),
                right: property_ref!(alias, "PK"),
            },
        }
    }

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![property("this", "PK")])
            .from(table_ref!("Order"), "this")
            .build();

        assert_eq!(ast.columns, vec![property("this", "PK")]);
        assert_eq!(ast.from.unwrap().table.name, "Order");
        assert!(ast.conditions.is_empty());
    }

    #[test]
    fn test_build_deduplicates_joins() {
        let ast = SelectBuilder::new()
            .select(vec![property("this", "PK")])
            .from(table_ref!("Order"), "this")
            .join(join("Address", "thisdeliveryAddress", "this", "deliveryAddress"))
            .join(join("User", "thisuser", "this", "user"))
            .join(join("Address", "thisdeliveryAddress", "this", "deliveryAddress"))
            .build();

        let aliases: Vec<_> = ast.joins.iter().map(|j| j.alias.as_str()).collect();
        assert_eq!(aliases, vec!["thisdeliveryAddress", "thisuser"]);
    }

    #[test]
    fn test_build_groups_conditions() {
        let ast = SelectBuilder::new()
            .select(vec![property("this", "PK")])
            .from(table_ref!("Order"), "this")
            .and_where(raw("{this.code} = ?a"))
            .build();

        assert_eq!(
            ast.conditions,
            vec![Expr::Grouped(Box::new(raw("{this.code} = ?a")))]
        );
    }
}
