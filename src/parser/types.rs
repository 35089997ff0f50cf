//! Value kinds for registry variables and how literal text converts to them

use chrono::NaiveDate;
use itertools::Itertools;
use std::fmt;

/// Calendar format accepted for, and rendered from, `Date` variables
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest finite value of an IEEE half float
const HALF_FLOAT_MAX: f64 = 65504.0;

/// The declared kind of a registry variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum TypeOf {
    Integer,
    Long,
    Short,
    HalfFloat,
    OneDP,
    TwoDP,
    Date,
    Keyword,
}

/// Whether a variable accepts membership (`contains`) in addition to comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Function {
    None,
    Keyword,
}

/// A literal value that has been checked against a [`TypeOf`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    /// One or more comma separated keywords
    Keyword(Vec<String>),
}

impl TypeOf {
    /// Parse raw text as a value of this kind.
    ///
    /// Returns a reason on failure; the caller attaches the source span.
    pub fn parse(&self, text: &str) -> Result<Literal, String> {
        let text = text.trim();
        match self {
            TypeOf::Short => parse_integer::<i16>(text),
            TypeOf::Integer => parse_integer::<i32>(text),
            TypeOf::Long => parse_integer::<i64>(text),
            TypeOf::HalfFloat => {
                let value = parse_float(text)?;
                if value.abs() > HALF_FLOAT_MAX {
                    return Err(format!("{} is outside the half float range", text));
                }
                Ok(Literal::Float(value))
            }
            TypeOf::OneDP | TypeOf::TwoDP => {
                let value = parse_float(text)?;
                let places = self.decimal_places().unwrap_or_default();
                if format!("{:.*}", places, value).parse::<f64>() != Ok(value) {
                    return Err(format!(
                        "{} has more than {} decimal place{}",
                        text,
                        places,
                        if places == 1 { "" } else { "s" }
                    ));
                }
                Ok(Literal::Float(value))
            }
            TypeOf::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Literal::Date)
                .map_err(|e| format!("{} is not a YYYY-MM-DD date ({})", text, e)),
            TypeOf::Keyword => {
                let items: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();
                if items.iter().any(String::is_empty) {
                    return Err("empty keyword in list".to_string());
                }
                Ok(Literal::Keyword(items))
            }
        }
    }

    /// Number of decimal places output columns of this kind are shown with.
    ///
    /// Only the fixed point kinds (`OneDP`, `TwoDP`) hold filter literals to
    /// this precision; a `HalfFloat` literal keeps whatever precision it was
    /// written with.
    pub fn decimal_places(&self) -> Option<usize> {
        match self {
            TypeOf::HalfFloat => Some(0),
            TypeOf::OneDP => Some(1),
            TypeOf::TwoDP => Some(2),
            _ => None,
        }
    }

    /// Keyword values are compared for membership only, never ordered
    pub fn is_ordered(&self) -> bool {
        !matches!(self, TypeOf::Keyword)
    }

    pub fn function(&self) -> Function {
        match self {
            TypeOf::Keyword => Function::Keyword,
            _ => Function::None,
        }
    }

    /// Human readable list of accepted operators
    pub fn operators(&self) -> &'static str {
        if self.is_ordered() {
            "!=, <, <=, =, ==, >, >="
        } else {
            "!=, =, ==, contains"
        }
    }

    /// Render a literal of this kind in backend filter syntax, without
    /// losing any digit of the parsed value
    pub fn render(&self, literal: &Literal) -> String {
        match (literal, self) {
            (Literal::Float(v), TypeOf::OneDP | TypeOf::TwoDP) => {
                format!("{:.*}", self.decimal_places().unwrap_or_default(), v)
            }
            (Literal::Float(v), _) => v.to_string(),
            (Literal::Integer(v), _) => v.to_string(),
            (Literal::Date(d), _) => d.format(DATE_FORMAT).to_string(),
            (Literal::Keyword(items), _) => items.iter().join(","),
        }
    }
}

impl fmt::Display for TypeOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeOf::Integer => "integer",
            TypeOf::Long => "long",
            TypeOf::Short => "short",
            TypeOf::HalfFloat => "half_float",
            TypeOf::OneDP => "1dp",
            TypeOf::TwoDP => "2dp",
            TypeOf::Date => "date",
            TypeOf::Keyword => "keyword",
        };
        write!(f, "{}", name)
    }
}

fn parse_integer<T>(text: &str) -> Result<Literal, String>
where
    T: std::str::FromStr + Into<i64>,
    T::Err: fmt::Display,
{
    text.parse::<T>()
        .map(|v| Literal::Integer(v.into()))
        .map_err(|e| format!("{} ({})", text, e))
}

fn parse_float(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("{} is not a finite number", text)),
        Err(e) => Err(format!("{} ({})", text, e)),
    }
}
