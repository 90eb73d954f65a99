use crate::query::{
    ast::{
        common::{JoinKind, TableRef},
        expr::PropertyRef,
        select::{JoinClause, JoinCondition},
    },
    dialect::Dialect,
};
use std::collections::HashMap;
use tracing::trace;

/// Alias of the query's root item.
pub const ROOT_ALIAS: &str = "this";

/// Relation paths already joined in one compilation, keyed by the dotted
/// column path from the root (e.g. `deliveryAddress.country`).
#[derive(Debug, Default)]
pub struct JoinTracker {
    aliases: HashMap<String, String>,
    joins: Vec<JoinClause>,
}

/// Where a property read happens: the alias to qualify it with, and the path
/// that leads there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPath {
    pub path: String,
    pub alias: String,
}

impl JoinPath {
    pub fn root() -> Self {
        Self {
            path: String::new(),
            alias: ROOT_ALIAS.to_string(),
        }
    }

    fn child(&self, column: &str) -> Self {
        let path = if self.path.is_empty() {
            column.to_string()
        } else {
            format!("{}.{column}", self.path)
        };
        Self {
            path,
            alias: format!("{}{column}", self.alias),
        }
    }
}

impl JoinTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the relation stored in `column` of `parent`, joining `table`
    /// the first time the hop is seen.
    pub fn traverse(
        &mut self,
        parent: &JoinPath,
        column: &str,
        table: &str,
        dialect: &dyn Dialect,
    ) -> JoinPath {
        let target = parent.child(column);
        if let Some(alias) = self.aliases.get(&target.path) {
            return JoinPath {
                path: target.path,
                alias: alias.clone(),
            };
        }

        let join = JoinClause {
            kind: JoinKind::Left,
            table: TableRef {
                name: table.to_string(),
            },
            alias: target.alias.clone(),
            on: JoinCondition {
                left: PropertyRef {
                    qualifier: parent.alias.clone(),
                    name: column.to_string(),
                },
                right: PropertyRef {
                    qualifier: target.alias.clone(),
                    name: dialect.primary_key().to_string(),
                },
            },
        };
        trace!(path = %target.path, alias = %target.alias, table, "join added");
        self.aliases.insert(target.path.clone(), target.alias.clone());
        self.joins.push(join);
        target
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn into_joins(self) -> Vec<JoinClause> {
        self.joins
    }
}
