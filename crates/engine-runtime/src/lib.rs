pub mod error;
pub mod executor;
pub mod service;

pub use error::{ExecutorError, SearchError};
pub use executor::QueryExecutor;
pub use service::SearchService;
