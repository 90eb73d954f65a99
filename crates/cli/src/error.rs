use planner::{CompileError, ResolutionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the lambda query: {0}")]
    QueryDeserialize(#[from] serde_json::Error),

    #[error("Failed to load the schema: {0}")]
    Schema(#[from] ResolutionError),

    #[error("Failed to compile the query: {0}")]
    Compile(#[from] CompileError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
