//! Compile `-e` filter text into validated clauses
//!
//! The grammar is flat: clauses joined by `AND`, where each clause may be a
//! small `OR` group of alternative values for one variable. The text is split
//! three times (on `AND`, then `OR`, then the comparison operators) and every
//! clause is checked against the [`Registry`] before anything is returned.

use std::fmt;

use itertools::Itertools;
use miette::SourceSpan;
use once_cell::sync::Lazy;
use regex::Regex;
use slog::{debug, o, Logger};

use super::error::{span_at, ExpressionError};
use super::registry::{Registry, Variable};
use super::split::{split, with_offsets, Span};
use super::suggest::did_you_mean;
use super::types::{Function, Literal, TypeOf};

/// Default cap on expression length, in characters
pub const DEFAULT_MAX_LENGTH: usize = 100;

static AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bAND\b").unwrap());
static OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bOR\b").unwrap());
static NOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNOT\b").unwrap());
static OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!=|<=|>=|==|=|<|>|\bcontains\b").unwrap());
static TAX_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btax_(name|tree|lineage)\b").unwrap());
static FUNCTION_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_\-]+)\s*\((.*)\)$").unwrap());
static SUMMARY_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(min|max)\s*\(\s*([^()\s]*)\s*\)$").unwrap());

/// A comparison between a variable and a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum ComparisonOp {
    /// `=` or `==`
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `contains` or the function form `variable(value)`
    Contains,
}

impl ComparisonOp {
    fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "=" | "==" => ComparisonOp::Eq,
            "!=" => ComparisonOp::NotEq,
            "<" => ComparisonOp::Lt,
            "<=" => ComparisonOp::LtEq,
            ">" => ComparisonOp::Gt,
            ">=" => ComparisonOp::GtEq,
            "contains" => ComparisonOp::Contains,
            _ => return None,
        };
        Some(op)
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            ComparisonOp::Lt | ComparisonOp::LtEq | ComparisonOp::Gt | ComparisonOp::GtEq
        )
    }

    /// Operators that select values rather than exclude or order them
    pub fn is_membership(&self) -> bool {
        matches!(self, ComparisonOp::Eq | ComparisonOp::Contains)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::Contains => "contains",
        };
        write!(f, "{}", s)
    }
}

/// `min(variable)` / `max(variable)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Summary {
    Min,
    Max,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Min => write!(f, "min"),
            Summary::Max => write!(f, "max"),
        }
    }
}

/// One validated comparison
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Clause {
    pub variable: String,
    pub summary: Option<Summary>,
    pub operator: ComparisonOp,
    pub value: Literal,
    pub kind: TypeOf,
    /// `Keyword` for membership tests, `None` for plain comparisons
    pub function: Function,
}

impl Clause {
    fn target(&self) -> String {
        match self.summary {
            Some(summary) => format!("{}({})", summary, self.variable),
            None => self.variable.clone(),
        }
    }

    fn rendered_value(&self) -> String {
        self.kind.render(&self.value)
    }

    /// Backend filter text for this clause alone
    pub fn render(&self) -> String {
        render_membership(self, std::iter::once(self.rendered_value())).unwrap_or_else(|| {
            let op = match self.operator {
                ComparisonOp::Contains => ComparisonOp::Eq,
                op => op,
            };
            format!("{}{}{}", self.target(), op, self.rendered_value())
        })
    }
}

/// `tax_rank` is the one variable the backend filters in function form
fn render_membership(
    clause: &Clause,
    values: impl Iterator<Item = String>,
) -> Option<String> {
    if clause.variable == "tax_rank" && clause.operator.is_membership() {
        Some(format!("tax_rank({})", values.format(",")))
    } else {
        None
    }
}

/// Clauses joined by `OR`; always alternatives for a single variable
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ClauseGroup {
    clauses: Vec<Clause>,
}

impl ClauseGroup {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Backend filter text, with OR alternatives merged into one value list
    pub fn render(&self) -> String {
        match self.clauses.as_slice() {
            [single] => single.render(),
            [first, ..] => {
                let values = self.clauses.iter().map(Clause::rendered_value);
                render_membership(first, values.clone()).unwrap_or_else(|| {
                    format!("{}={}", first.target(), values.format(","))
                })
            }
            [] => String::new(),
        }
    }
}

/// A fully validated filter expression
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CLIexpression {
    groups: Vec<ClauseGroup>,
}

impl CLIexpression {
    /// AND-joined groups in input order
    pub fn groups(&self) -> &[ClauseGroup] {
        &self.groups
    }

    /// Every clause in input order
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.groups.iter().flat_map(|g| g.clauses.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Filter text for the backend `query` parameter, groups joined by ` AND `
    pub fn to_query(&self) -> String {
        self.groups.iter().map(ClauseGroup::render).join(" AND ")
    }
}

impl fmt::Display for CLIexpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

/// Compiles filter text against one registry
#[derive(Debug, Clone)]
pub struct Compiler<'r> {
    registry: &'r Registry,
    max_length: usize,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Compiler {
            registry,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Compile `expression`, returning the first error in left-to-right order
    pub fn compile(
        &self,
        logger: &Logger,
        expression: &str,
    ) -> Result<CLIexpression, ExpressionError> {
        let logger = logger.new(o!("index" => self.registry.index().to_string()));
        let ctx = Context { src: expression };

        self.precheck(&ctx)?;

        let mut groups = Vec::new();
        for (offset, chunk) in unmatched(&split(&AND, expression), 0) {
            if chunk.trim().is_empty() {
                return Err(ctx.keyword_and(offset, chunk.len(), "missing clause next to AND"));
            }
            groups.push(self.compile_group(&ctx, chunk, offset)?);
        }

        let expr = CLIexpression { groups };
        debug!(logger, "compiled expression";
            "input" => expression, "query" => %expr, "clauses" => expr.clauses().count());
        Ok(expr)
    }

    fn precheck(&self, ctx: &Context) -> Result<(), ExpressionError> {
        let src = ctx.src;
        if src.trim().is_empty() {
            return Err(ctx.parse(0, src.len(), "empty expression"));
        }

        let length = src.chars().count();
        if length > self.max_length {
            return Err(ExpressionError::QueryTooLong {
                length,
                limit: self.max_length,
                span: span_at(src, 0, src.len()),
                src: src.to_string(),
            });
        }

        let keyword_errors = [
            src.find("&&")
                .map(|at| (at, ctx.keyword_and(at, 2, "use AND instead of &&"))),
            src.find("||")
                .map(|at| (at, ctx.keyword_or(at, 2, "use OR instead of ||"))),
            TAX_KEYWORD.find(src).map(|m| {
                let err = ExpressionError::KeywordTax {
                    keyword: m.as_str().to_string(),
                    span: span_at(src, m.start(), m.len()),
                    src: src.to_string(),
                };
                (m.start(), err)
            }),
            NOT.find(src)
                .map(|m| (m.start(), ctx.not_yet_implemented(m.start(), m.len(), "NOT"))),
        ];
        // leftmost offender wins
        if let Some((_, err)) = keyword_errors.into_iter().flatten().min_by_key(|(at, _)| *at) {
            return Err(err);
        }
        Ok(())
    }

    fn compile_group(
        &self,
        ctx: &Context,
        chunk: &str,
        base: usize,
    ) -> Result<ClauseGroup, ExpressionError> {
        let mut clauses: Vec<(Clause, SourceSpan)> = Vec::new();
        for (offset, segment) in unmatched(&split(&OR, chunk), base) {
            if segment.trim().is_empty() {
                return Err(ctx.keyword_or(offset, segment.len(), "missing clause next to OR"));
            }
            clauses.push(self.compile_clause(ctx, segment, offset)?);
        }

        if clauses.len() > 1 {
            let first = clauses[0].0.variable.as_str();
            for (clause, span) in &clauses {
                let reason = if clause.variable != first {
                    "alternatives must all name the same variable"
                } else if clause.summary.is_some() {
                    "summaries cannot be combined with OR"
                } else if !clause.operator.is_membership() {
                    "alternatives must use =, == or contains"
                } else {
                    continue;
                };
                return Err(ExpressionError::KeywordOr {
                    reason: reason.to_string(),
                    span: *span,
                    src: ctx.src.to_string(),
                });
            }
        }

        Ok(ClauseGroup {
            clauses: clauses.into_iter().map(|(c, _)| c).collect(),
        })
    }

    fn compile_clause(
        &self,
        ctx: &Context,
        segment: &str,
        base: usize,
    ) -> Result<(Clause, SourceSpan), ExpressionError> {
        let start = base + (segment.len() - segment.trim_start().len());
        let text = segment.trim();
        let clause_span = span_at(ctx.src, start, text.len());

        if text.starts_with('(') {
            return Err(ctx.not_yet_implemented(start, text.len(), "Parenthesised sub-expressions"));
        }

        let raw = RawClause::parse(ctx, text, start)?;
        let clause = self.validate(ctx, raw)?;
        Ok((clause, clause_span))
    }

    fn validate(&self, ctx: &Context, raw: RawClause) -> Result<Clause, ExpressionError> {
        let variable = self.resolve(ctx, &raw)?;

        if raw.summary.is_some() && !variable.summary {
            return Err(ExpressionError::InputVariable {
                variable: raw.variable.text.to_string(),
                suggestion: None,
                span: raw.variable.span(ctx),
                src: ctx.src.to_string(),
                help: Some(format!(
                    "'{}' has no min/max summary; compare it directly",
                    variable.name
                )),
            });
        }

        if raw.operator == ComparisonOp::Contains {
            let reason = if variable.function() != Function::Keyword {
                Some(format!("'{}' is a {} variable", variable.name, variable.kind))
            } else if !variable.is_enum() {
                Some(format!("'{}' has no fixed set of values", variable.name))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ExpressionError::KeywordContains {
                    variable: variable.name.to_string(),
                    reason,
                    span: raw.operator_span(ctx),
                    src: ctx.src.to_string(),
                });
            }
        }

        if variable.kind == TypeOf::Keyword && raw.operator.is_ordering() {
            return Err(ExpressionError::KeywordEnum {
                variable: variable.name.to_string(),
                value: raw.value.text.to_string(),
                reason: format!("keywords cannot be compared with {}", raw.operator),
                span: raw.operator_span(ctx),
                src: ctx.src.to_string(),
                help: Some(format!("Use one of: {}", variable.kind.operators())),
            });
        }

        let value = variable
            .kind
            .parse(raw.value.text)
            .map_err(|reason| ExpressionError::FormatExpression {
                variable: variable.name.to_string(),
                expected: variable.kind,
                found: raw.value.text.to_string(),
                reason,
                span: raw.value.span(ctx),
                src: ctx.src.to_string(),
            })?;

        if let (Literal::Keyword(items), true) = (&value, variable.is_enum()) {
            if let Some(bad) = items.iter().find(|item| !variable.values.contains(&item.as_str())) {
                let help = match did_you_mean(bad, variable.values.iter().copied()) {
                    Some(s) => format!("Did you mean: {}?", s),
                    None => format!("Enter one of: {}", variable.values.join(", ")),
                };
                return Err(ExpressionError::KeywordEnum {
                    variable: variable.name.to_string(),
                    value: bad.clone(),
                    reason: "not an allowed value".to_string(),
                    span: raw.value.span(ctx),
                    src: ctx.src.to_string(),
                    help: Some(help),
                });
            }
        }

        let function = if raw.operator == ComparisonOp::Contains {
            Function::Keyword
        } else {
            Function::None
        };

        Ok(Clause {
            variable: variable.name.to_string(),
            summary: raw.summary,
            operator: raw.operator,
            value,
            kind: variable.kind,
            function,
        })
    }

    fn resolve(&self, ctx: &Context, raw: &RawClause) -> Result<&'r Variable, ExpressionError> {
        let name = raw.variable.text;
        self.registry.lookup(name).ok_or_else(|| {
            let suggestion = self.registry.suggest(name);
            ExpressionError::InputVariable {
                variable: name.to_string(),
                suggestion: suggestion.map(str::to_string),
                span: raw.variable.span(ctx),
                src: ctx.src.to_string(),
                help: suggestion.map(|s| format!("Did you mean: {}?", s)),
            }
        })
    }
}

/// Unmatched spans (the text between delimiters) with their offsets
fn unmatched<'t>(spans: &[Span<'t>], base: usize) -> Vec<(usize, &'t str)> {
    with_offsets(spans, base)
        .filter(|(_, span)| !span.is_captured())
        .map(|(offset, span)| (offset, span.as_str()))
        .collect()
}

/// A token and where it starts in the source
#[derive(Debug, Clone, Copy)]
struct Token<'t> {
    text: &'t str,
    offset: usize,
}

impl<'t> Token<'t> {
    /// Trim whitespace, keeping the offset pointed at the first kept byte
    fn trimmed(text: &'t str, offset: usize) -> Self {
        let lead = text.len() - text.trim_start().len();
        Token {
            text: text.trim(),
            offset: offset + lead,
        }
    }

    fn span(&self, ctx: &Context) -> SourceSpan {
        span_at(ctx.src, self.offset, self.text.len())
    }
}

/// A clause split into its parts but not yet checked against the registry
#[derive(Debug)]
struct RawClause<'t> {
    summary: Option<Summary>,
    variable: Token<'t>,
    operator: ComparisonOp,
    /// `None` for the function form, which has no operator token
    operator_token: Option<Token<'t>>,
    value: Token<'t>,
}

impl<'t> RawClause<'t> {
    fn parse(ctx: &Context, text: &'t str, start: usize) -> Result<Self, ExpressionError> {
        let spans = split(&OPERATOR, text);
        let parts: Vec<(usize, Span<'t>)> = with_offsets(&spans, start).collect();

        match parts.as_slice() {
            [(_, Span::Unmatched(_))] => Self::parse_function_form(ctx, text, start),
            [(lhs_at, lhs), (op_at, op), (rhs_at, rhs)] => {
                let operator = ComparisonOp::from_token(op.as_str())
                    .ok_or_else(|| ctx.parse(*op_at, op.as_str().len(), "unknown operator"))?;
                let (summary, variable) = Self::parse_target(ctx, Token::trimmed(lhs.as_str(), *lhs_at))?;
                let value = unquote(Token::trimmed(rhs.as_str(), *rhs_at));
                if value.text.is_empty() {
                    return Err(ctx.parse(value.offset, 0, "missing value"));
                }
                Ok(RawClause {
                    summary,
                    variable,
                    operator,
                    operator_token: Some(Token {
                        text: op.as_str(),
                        offset: *op_at,
                    }),
                    value,
                })
            }
            [_, _, _, (second_at, second), ..] => Err(ctx.parse(
                *second_at,
                second.as_str().len(),
                "more than one operator in a clause",
            )),
            _ => Err(ctx.parse(start, text.len(), "malformed clause")),
        }
    }

    /// `variable(value)`, treated as `variable contains value`
    fn parse_function_form(
        ctx: &Context,
        text: &'t str,
        start: usize,
    ) -> Result<Self, ExpressionError> {
        let caps = FUNCTION_FORM
            .captures(text)
            .filter(|c| !matches!(&c[1], "min" | "max"));
        let Some(caps) = caps else {
            return Err(ExpressionError::NoOperator {
                clause: text.to_string(),
                span: span_at(ctx.src, start, text.len()),
                src: ctx.src.to_string(),
            });
        };
        // both groups always participate in a match
        let (name, inner) = match (caps.get(1), caps.get(2)) {
            (Some(name), Some(inner)) => (name, inner),
            _ => return Err(ctx.parse(start, text.len(), "malformed function call")),
        };
        let value = unquote(Token::trimmed(inner.as_str(), start + inner.start()));
        if value.text.is_empty() {
            return Err(ctx.parse(value.offset, 0, "missing value"));
        }
        Ok(RawClause {
            summary: None,
            variable: Token {
                text: name.as_str(),
                offset: start + name.start(),
            },
            operator: ComparisonOp::Contains,
            operator_token: None,
            value,
        })
    }

    /// Left hand side: a bare variable name or `min(name)` / `max(name)`
    fn parse_target(
        ctx: &Context,
        lhs: Token<'t>,
    ) -> Result<(Option<Summary>, Token<'t>), ExpressionError> {
        if lhs.text.is_empty() {
            return Err(ctx.parse(lhs.offset, 0, "missing variable name"));
        }
        let Some(caps) = SUMMARY_FORM.captures(lhs.text) else {
            return Ok((None, lhs));
        };
        let summary = match &caps[1] {
            "min" => Summary::Min,
            _ => Summary::Max,
        };
        match caps.get(2) {
            Some(inner) if !inner.as_str().is_empty() => Ok((
                Some(summary),
                Token {
                    text: inner.as_str(),
                    offset: lhs.offset + inner.start(),
                },
            )),
            _ => Err(ctx.parse(lhs.offset, lhs.text.len(), "missing variable name in summary")),
        }
    }

    fn operator_span(&self, ctx: &Context) -> SourceSpan {
        match self.operator_token {
            Some(token) => token.span(ctx),
            None => self.variable.span(ctx),
        }
    }
}

/// Strip one pair of matching surrounding quotes
fn unquote(token: Token<'_>) -> Token<'_> {
    let text = token.text;
    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')));
    if quoted {
        Token {
            text: text[1..text.len() - 1].trim(),
            offset: token.offset + 1,
        }
    } else {
        token
    }
}

/// Source text shared by every error built during one compile
struct Context<'s> {
    src: &'s str,
}

impl Context<'_> {
    fn parse(&self, offset: usize, len: usize, reason: &str) -> ExpressionError {
        ExpressionError::ExpressionParse {
            reason: reason.to_string(),
            span: span_at(self.src, offset, len),
            src: self.src.to_string(),
        }
    }

    fn keyword_and(&self, offset: usize, len: usize, reason: &str) -> ExpressionError {
        ExpressionError::KeywordAnd {
            reason: reason.to_string(),
            span: span_at(self.src, offset, len),
            src: self.src.to_string(),
        }
    }

    fn keyword_or(&self, offset: usize, len: usize, reason: &str) -> ExpressionError {
        ExpressionError::KeywordOr {
            reason: reason.to_string(),
            span: span_at(self.src, offset, len),
            src: self.src.to_string(),
        }
    }

    fn not_yet_implemented(&self, offset: usize, len: usize, feature: &str) -> ExpressionError {
        ExpressionError::NotYetImplemented {
            feature: feature.to_string(),
            span: span_at(self.src, offset, len),
            src: self.src.to_string(),
        }
    }
}
