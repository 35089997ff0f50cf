//! Compile GoaT filter expressions and field selections into API request URLs
//!
//! ```
//! use goat_cli::parser::{Compiler, IndexType, Registry};
//!
//! let registry = Registry::new(IndexType::Taxon);
//! let logger = slog::Logger::root(slog::Discard, slog::o!());
//! let expr = Compiler::new(&registry)
//!     .compile(&logger, "tax_rank(genus) AND assembly_span>1000000")
//!     .unwrap();
//! assert_eq!(expr.to_query(), "tax_rank(genus) AND assembly_span>1000000");
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod tax_ranks;
pub mod url;
pub mod variables;

pub use error::{GoatError, Result};
pub use parser::{CLIexpression, Compiler, ExpressionError, IndexType, Registry};

/// Root of the public API
pub const GOAT_URL: &str = "https://goat.genomehubs.org/api/v2/";

/// The only taxonomy the backend serves
pub const TAXONOMY: &str = "ncbi";

/// Largest `size` a single request may ask for
pub const UPPER_CLI_SIZE_LIMIT: u64 = 50_000;

/// Most taxa that may be read from a `-f` file
pub const UPPER_CLI_FILE_LIMIT: usize = 500;
