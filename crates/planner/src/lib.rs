pub mod compiler;
pub mod error;
pub mod metadata;
pub mod query;
pub mod translate;

pub use compiler::{QueryCompiler, names::ParameterNameGenerator, result::TranslationResult};
pub use error::{CompileError, ResolutionError};
pub use metadata::{ConventionMetadata, MetadataResolver, StaticMetadata};
pub use translate::{CompiledQuery, LambdaQuery, QueryTranslator};
