pub mod compiler;
pub mod error;
pub mod registry;
pub mod split;
pub mod suggest;
pub mod types;
mod variable_data;

// Re-exports for clean API
pub use compiler::{CLIexpression, Clause, ClauseGroup, ComparisonOp, Compiler, Summary};
pub use error::ExpressionError;
pub use registry::{IndexType, Registry, Variable};
pub use types::{Function, Literal, TypeOf};
