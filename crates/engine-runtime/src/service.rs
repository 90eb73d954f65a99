use crate::{
    error::{ExecutorError, SearchError},
    executor::QueryExecutor,
};
use model::core::value::Value;
use planner::{CompiledQuery, LambdaQuery, QueryTranslator};
use std::sync::Arc;
use tracing::{debug, warn};

/// Compiles lambda queries and hands them to a [`QueryExecutor`].
#[derive(Clone)]
pub struct SearchService {
    translator: QueryTranslator,
    executor: Arc<dyn QueryExecutor>,
}

impl SearchService {
    pub fn new(translator: QueryTranslator, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            translator,
            executor,
        }
    }

    pub fn translator(&self) -> &QueryTranslator {
        &self.translator
    }

    /// All matches, limited by the query's own limit if it has one.
    pub async fn get_list(&self, query: &LambdaQuery) -> Result<Vec<Value>, SearchError> {
        let compiled = self.translator.translate(query)?;
        Ok(self.run(&compiled).await?)
    }

    /// The first match, if any.
    pub async fn get_first(&self, query: &LambdaQuery) -> Result<Option<Value>, SearchError> {
        let compiled = self.translator.translate(&query.clone().limit(1))?;
        let rows = self.run(&compiled).await?;
        Ok(rows.into_iter().next())
    }

    /// Exactly one match; zero and several are both errors.
    pub async fn get_single_result(&self, query: &LambdaQuery) -> Result<Value, SearchError> {
        let compiled = self.translator.translate(&query.clone().limit(2))?;
        let mut rows = self.run(&compiled).await?;

        match rows.len() {
            0 => Err(SearchError::NotFound {
                query: compiled.query,
            }),
            1 => Ok(rows.remove(0)),
            _ => {
                warn!(query = %compiled.query, "single result requested, several found");
                Err(SearchError::Ambiguous {
                    query: compiled.query,
                })
            }
        }
    }

    async fn run(&self, compiled: &CompiledQuery) -> Result<Vec<Value>, ExecutorError> {
        debug!(
            query = %compiled.query,
            parameters = compiled.parameters.len(),
            count = ?compiled.count,
            "executing query"
        );
        let mut rows = self.executor.search(compiled).await?;
        if let Some(count) = compiled.count {
            rows.truncate(count);
        }
        debug!(rows = rows.len(), "query executed");
        Ok(rows)
    }
}
