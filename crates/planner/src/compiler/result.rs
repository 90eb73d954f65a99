use crate::query::{ast::select::JoinClause, dialect::Dialect, renderer::Renderer};
use model::core::value::Value;
use std::collections::BTreeMap;

/// Output of compiling one predicate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TranslationResult {
    pub where_text: String,
    /// Distinct joins in first-encountered order.
    pub joins: Vec<JoinClause>,
    pub parameters: BTreeMap<String, Value>,
}

impl TranslationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `join` unless an identical clause is already present.
    pub fn add_join(&mut self, join: JoinClause) {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }

    /// Folds another predicate's result into this aggregate: joins appended
    /// without duplicates, bindings merged, where-text parenthesized and
    /// AND-joined. Blank where-text contributes no condition.
    pub fn merge(&mut self, other: TranslationResult) {
        for join in other.joins {
            self.add_join(join);
        }
        self.parameters.extend(other.parameters);

        let fragment = other.where_text.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.where_text.is_empty() {
            self.where_text.push_str(" AND ");
        }
        self.where_text.push('(');
        self.where_text.push_str(fragment);
        self.where_text.push(')');
    }

    /// Join clauses as query text.
    pub fn join_clauses(&self, dialect: &dyn Dialect) -> Vec<String> {
        self.joins
            .iter()
            .map(|join| Renderer::render_to_string(join, dialect))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        property_ref,
        query::{
            ast::{common::JoinKind, select::JoinCondition},
            dialect::FlexibleSearch,
        },
        table_ref,
    };

    fn user_join() -> JoinClause {
        JoinClause {
            kind: JoinKind::Left,
            table: table_ref!("User"),
            alias: "thisuser".to_string(),
            on: JoinCondition {
                left: property_ref!("this", "user"),
                right: property_ref!("thisuser", "PK"),
            },
        }
    }

    fn result(where_text: &str, param: Option<(&str, Value)>) -> TranslationResult {
        TranslationResult {
            where_text: where_text.to_string(),
            joins: vec![user_join()],
            parameters: param
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn test_merge_groups_fragments() {
        let mut all = TranslationResult::new();
        all.merge(result(" {thisuser.name} = ?a ", Some(("a", Value::from("Darek")))));
        all.merge(result("", None));
        all.merge(result("{this.code} = ?b", Some(("b", Value::Int(1)))));

        assert_eq!(all.where_text, "({thisuser.name} = ?a) AND ({this.code} = ?b)");
        assert_eq!(all.joins.len(), 1);
        assert_eq!(all.parameters.len(), 2);
    }

    #[test]
    fn test_join_clauses_text() {
        let all = result("", None);
        assert_eq!(
            all.join_clauses(&FlexibleSearch),
            vec!["LEFT JOIN User AS thisuser ON {this.user}={thisuser.PK}".to_string()]
        );
    }
}
