use expression_engine::ExpressionError;
use model::core::identifiers::EntityType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("No table mapping for type `{0}`")]
    NotFound(EntityType),

    #[error("Failed to load metadata: {0}")]
    Load(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[source] ExpressionError),

    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
}

impl From<ExpressionError> for CompileError {
    fn from(err: ExpressionError) -> Self {
        if err.is_unsupported() {
            CompileError::Unsupported(err.to_string())
        } else {
            CompileError::Evaluation(err)
        }
    }
}
