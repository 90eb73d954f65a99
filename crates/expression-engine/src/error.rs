use model::core::value::InvocationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("Unsupported expression: {0}")]
    Unsupported(String),

    #[error("Unsupported member: {0}")]
    UnsupportedMember(String),

    #[error("Parameter #{0} is not bound in the active scope")]
    UnboundParameter(usize),

    #[error("Invalid arguments for {method}: {message}")]
    InvalidArguments { method: String, message: String },

    #[error("Cannot call {method} on null")]
    NullReceiver { method: String },

    #[error("Call to {method} failed: {source}")]
    Invocation {
        method: String,
        #[source]
        source: InvocationError,
    },

    #[error("Call to {method} panicked")]
    Panicked { method: String },
}

impl ExpressionError {
    /// True when the tree holds a construct the evaluator does not translate,
    /// as opposed to a failure raised while running caller code.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ExpressionError::Unsupported(_) | ExpressionError::UnsupportedMember(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
