pub mod call;
pub mod context;
pub mod error;
pub mod eval;
pub mod methods;

pub use call::DynamicCall;
pub use context::EvalScope;
pub use error::{ExpressionError, Result};
pub use eval::ConstantFolder;
pub use methods::MethodRegistry;
