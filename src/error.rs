use miette::Diagnostic;
use thiserror::Error;

use crate::parser::ExpressionError;

pub type Result<T, E = GoatError> = std::result::Result<T, E>;

/// Everything the library can fail with
#[allow(dead_code)] // Fields are used by miette's derive macros
#[derive(Debug, Diagnostic, Error)]
pub enum GoatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Expression(#[from] ExpressionError),

    #[error("Unknown variable '{variable}' for the {index} index")]
    #[diagnostic(code(goat::variable))]
    Variable {
        variable: String,
        index: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown taxonomic rank '{rank}'")]
    #[diagnostic(code(goat::tax_rank))]
    TaxRank {
        rank: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not read file '{path}'")]
    #[diagnostic(code(goat::file))]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read line {line} of '{path}'")]
    #[diagnostic(code(goat::read_line))]
    ReadLine {
        path: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(goat::cli))]
    Cli {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not build request URL")]
    #[diagnostic(code(goat::url))]
    Url(#[from] url::ParseError),
}

impl GoatError {
    pub(crate) fn cli(message: impl Into<String>) -> Self {
        GoatError::Cli {
            message: message.into(),
            help: None,
        }
    }
}
