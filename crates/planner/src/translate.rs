//! Assembly of a whole query from its compiled predicates.

use crate::{
    compiler::{
        QueryCompiler, joins::ROOT_ALIAS, names::ParameterNameGenerator,
        result::TranslationResult,
    },
    error::CompileError,
    metadata::MetadataResolver,
    query::{
        builder::select::SelectBuilder,
        dialect::{Dialect, FlexibleSearch},
        property, raw,
        renderer::{Render, Renderer},
    },
};
use expression_engine::{DynamicCall, MethodRegistry};
use model::{
    core::{identifiers::EntityType, value::Value},
    expr::Lambda,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tracing::debug;

/// A search over one item type: predicates AND-ed together plus an optional
/// row limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaQuery {
    pub item_type: EntityType,
    #[serde(default)]
    pub filters: Vec<Lambda>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl LambdaQuery {
    pub fn new(item_type: impl Into<EntityType>) -> Self {
        Self {
            item_type: item_type.into(),
            filters: Vec::new(),
            limit: None,
        }
    }

    pub fn filter(mut self, predicate: Lambda) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query text ready for the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub query: String,
    pub parameters: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Turns [`LambdaQuery`] values into [`CompiledQuery`] text.
///
/// Holds only shared, read-only collaborators; every call to
/// [`translate`](QueryTranslator::translate) gets its own name generator and
/// per-predicate compilers, so one translator can serve concurrent callers.
#[derive(Clone)]
pub struct QueryTranslator {
    metadata: Arc<dyn MetadataResolver>,
    calls: Arc<dyn DynamicCall>,
    dialect: Arc<dyn Dialect>,
}

impl QueryTranslator {
    pub fn new(metadata: Arc<dyn MetadataResolver>) -> Self {
        Self {
            metadata,
            calls: Arc::new(MethodRegistry::new()),
            dialect: Arc::new(FlexibleSearch),
        }
    }

    /// Replaces the method registry used to fold captured values.
    pub fn with_calls(mut self, calls: Arc<dyn DynamicCall>) -> Self {
        self.calls = calls;
        self
    }

    pub fn with_dialect(mut self, dialect: Arc<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn translate(&self, query: &LambdaQuery) -> Result<CompiledQuery, CompileError> {
        let mut names = ParameterNameGenerator::new();
        let mut all = TranslationResult::new();
        let mut fragments = Vec::new();

        for (index, filter) in query.filters.iter().enumerate() {
            let single = QueryCompiler::new(
                filter,
                self.metadata.as_ref(),
                self.calls.as_ref(),
                self.dialect.as_ref(),
                &mut names,
            )
            .compile()?;
            debug!(filter = index, where_text = %single.where_text, "filter translated");
            let fragment = single.where_text.trim();
            if !fragment.is_empty() {
                fragments.push(fragment.to_string());
            }
            all.merge(single);
        }

        let table = self.metadata.resolve_table_name(&query.item_type)?;
        let compiled = CompiledQuery {
            query: self.assemble(&table, &all, &fragments),
            parameters: all.parameters,
            count: query.limit.filter(|&limit| limit > 0),
        };
        debug!(
            item_type = %query.item_type,
            dialect = %self.dialect.name(),
            query = %compiled.query,
            "query translated"
        );
        Ok(compiled)
    }

    fn assemble(&self, table: &str, all: &TranslationResult, fragments: &[String]) -> String {
        let mut builder = SelectBuilder::new()
            .select(vec![property(ROOT_ALIAS, self.dialect.primary_key())])
            .from(crate::table_ref!(table), ROOT_ALIAS);
        for join in &all.joins {
            builder = builder.join(join.clone());
        }
        for fragment in fragments {
            builder = builder.and_where(raw(fragment.as_str()));
        }

        let select = builder.build();
        let mut renderer = Renderer::new(self.dialect.as_ref());
        select.render(&mut renderer);
        renderer.finish()
    }
}
