pub mod core;
pub mod expr;
