use crate::error::ExecutorError;
use async_trait::async_trait;
use model::core::value::Value;
use planner::CompiledQuery;

/// Runs compiled query text against the search engine.
///
/// Implementations return the matched items in engine order and honour
/// `CompiledQuery::count` as a row limit.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn search(&self, query: &CompiledQuery) -> Result<Vec<Value>, ExecutorError>;
}
