use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::types::TypeOf;

/// Everything that can go wrong while compiling a filter expression.
///
/// Each variant carries the full expression text and the byte span of the
/// offending token so miette can point at it.
#[allow(dead_code)] // Fields are used by miette's derive macros
#[derive(Debug, Clone, Diagnostic, Error)]
pub enum ExpressionError {
    #[error("Could not parse expression: {reason}")]
    #[diagnostic(
        code(goat::expression_parse),
        help("Clauses look like `variable OP value`, `variable contains value` or `variable(value)`")
    )]
    ExpressionParse {
        reason: String,
        #[label("{reason}")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Misplaced AND: {reason}")]
    #[diagnostic(
        code(goat::keyword_and),
        help("Join clauses with a single upper case AND, e.g. `a>1 AND b<2`")
    )]
    KeywordAnd {
        reason: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Unsupported OR: {reason}")]
    #[diagnostic(
        code(goat::keyword_or),
        help("OR may only join alternative values of one variable, e.g. `assembly_level=chromosome OR assembly_level=scaffold`")
    )]
    KeywordOr {
        reason: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Invalid value '{value}' for keyword variable '{variable}': {reason}")]
    #[diagnostic(code(goat::keyword_enum))]
    KeywordEnum {
        variable: String,
        value: String,
        reason: String,
        #[label("{reason}")]
        span: SourceSpan,
        #[source_code]
        src: String,
        #[help]
        help: Option<String>,
    },

    #[error("'contains' cannot be used with '{variable}': {reason}")]
    #[diagnostic(
        code(goat::keyword_contains),
        help("Use `goat variables` to list the enumerated keyword variables")
    )]
    KeywordContains {
        variable: String,
        reason: String,
        #[label("{reason}")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("'{keyword}' is not allowed inside an expression")]
    #[diagnostic(
        code(goat::keyword_tax),
        help("Set the taxon with -t/--taxon and descendants with -d/--descendants")
    )]
    KeywordTax {
        keyword: String,
        #[label("set through the command line instead")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Unknown variable: '{variable}'")]
    #[diagnostic(code(goat::input_variable))]
    InputVariable {
        variable: String,
        suggestion: Option<String>,
        #[label("not a variable of this index")]
        span: SourceSpan,
        #[source_code]
        src: String,
        #[help]
        help: Option<String>,
    },

    #[error("No operator found in '{clause}'")]
    #[diagnostic(
        code(goat::no_operator),
        help("Operators: !=, <, <=, =, ==, >, >=, contains")
    )]
    NoOperator {
        clause: String,
        #[label("expected a comparison")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Expected {expected} value for '{variable}', found: {found}")]
    #[diagnostic(code(goat::format_expression))]
    FormatExpression {
        variable: String,
        expected: TypeOf,
        found: String,
        reason: String,
        #[label("{reason}")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Expression is {length} characters long, the limit is {limit}")]
    #[diagnostic(
        code(goat::query_too_long),
        help("Split the query or narrow it with -t/--taxon")
    )]
    QueryTooLong {
        length: usize,
        limit: usize,
        #[label("too long")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("{feature} is not yet implemented")]
    #[diagnostic(code(goat::not_yet_implemented))]
    NotYetImplemented {
        feature: String,
        #[label("unsupported")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },
}

impl ExpressionError {
    /// Byte span of the offending token
    pub fn span(&self) -> SourceSpan {
        use ExpressionError::*;
        match self {
            ExpressionParse { span, .. }
            | KeywordAnd { span, .. }
            | KeywordOr { span, .. }
            | KeywordEnum { span, .. }
            | KeywordContains { span, .. }
            | KeywordTax { span, .. }
            | InputVariable { span, .. }
            | NoOperator { span, .. }
            | FormatExpression { span, .. }
            | QueryTooLong { span, .. }
            | NotYetImplemented { span, .. } => *span,
        }
    }
}

/// Span covering `len` bytes at `offset` inside `src`.
///
/// Always at least one byte wide and inside `src`, so an empty token still
/// gets a visible label.
pub(crate) fn span_at(src: &str, offset: usize, len: usize) -> SourceSpan {
    if src.is_empty() {
        return SourceSpan::new(0.into(), 0);
    }
    let offset = offset.min(src.len() - 1);
    let len = len.max(1).min(src.len() - offset);
    SourceSpan::new(offset.into(), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_never_empty() {
        let src = "genome_size>";
        assert_eq!(span_at(src, 4, 0).len(), 1);
        assert_eq!(span_at(src, 4, 3).offset(), 4);
        assert_eq!(span_at(src, 4, 3).len(), 3);
        // an empty value after a trailing operator
        assert_eq!(span_at(src, 12, 0).offset(), 11);
        assert_eq!(span_at("", 0, 0).len(), 0);
    }

    #[test]
    fn test_display_names_variable() {
        let err = ExpressionError::InputVariable {
            variable: "bogus_field".into(),
            suggestion: Some("busco_lineage".into()),
            span: span_at("bogus_field=5", 0, 11),
            src: "bogus_field=5".into(),
            help: None,
        };
        assert_eq!(err.to_string(), "Unknown variable: 'bogus_field'");
        assert_eq!(err.span().len(), 11);
    }
}
