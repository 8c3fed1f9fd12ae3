//! The `type:rule` directive mini-language and its parser.
//!
//! Each schema value is a string of the form `<data_type>:<rule>`, where
//! `data_type` is one of `timestamp`, `str` or `int` and `rule` selects how
//! values are produced:
//!
//! - `timestamp:` — current wall-clock time (timestamp takes no rule)
//! - `str:rand` — a fresh UUID-v4 string
//! - `int:rand` — a uniform integer in `[0, 10000]`
//! - `int:[1, 2, 3]` / `str:['a', 'b']` — uniform choice from the list
//! - `int:rand(a, b)` — a uniform integer in `[a, b]`
//! - `str:cat` / `int:100` — the literal itself, every time
//! - `int:` — null; `str:` — empty string
//!
//! Bracketed lists and `rand(a, b)` rules are handled by an explicit
//! tokenizer; rule text is never evaluated as an expression.

use crate::value::Literal;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Upper bound (inclusive) for the bare `int:rand` rule.
pub const RANDOM_INT_MAX: i64 = 10_000;

/// Errors produced while parsing a directive string.
#[derive(Debug, Error)]
pub enum DirectiveError {
    /// The directive has no `:` separator.
    #[error("malformed directive {0:?}: missing ':' separator")]
    MalformedDirective(String),

    /// The part before `:` is not a known data type.
    #[error("unknown data type {data_type:?} in directive {raw:?}")]
    UnknownDataType { data_type: String, raw: String },

    /// The rule is not valid for the declared data type.
    #[error("invalid rule in directive {raw:?}: {reason}")]
    InvalidRule { raw: String, reason: String },
}

/// The declared data type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Timestamp,
    Str,
    Int,
}

impl DataType {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "timestamp" => Some(DataType::Timestamp),
            "str" => Some(DataType::Str),
            "int" => Some(DataType::Int),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            DataType::Timestamp => "timestamp",
            DataType::Str => "str",
            DataType::Int => "int",
        };
        f.write_str(keyword)
    }
}

/// A parsed generation rule for one schema field.
///
/// Variants cover exactly the valid data-type/rule combinations, so an
/// incompatible pairing (e.g. a range rule on a string field) cannot be
/// represented and is rejected by [`Directive::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `timestamp:` — wall-clock seconds since the epoch.
    CurrentTime,
    /// `str:rand` — a fresh UUID-v4 string per record.
    RandomUuid,
    /// `int:rand` — uniform integer in `[0, RANDOM_INT_MAX]`.
    RandomInt,
    /// A bracketed list — uniform choice among the literals (never empty).
    OneOf(Vec<Literal>),
    /// `int:rand(a, b)` — uniform integer in `[min, max]`. A reversed
    /// range is rejected at generation time, not here.
    IntRange { min: i64, max: i64 },
    /// A standalone literal, returned unchanged on every generation.
    Static(Literal),
    /// `int:` — null.
    Null,
    /// `str:` — empty string.
    EmptyString,
}

impl Directive {
    /// Parse one raw directive string.
    ///
    /// Returns `Ok(None)` for the warn-and-skip case: a `timestamp` field
    /// with a non-empty rule. Timestamp fields never take a value, so the
    /// rule is ignored and the field is dropped from generated records
    /// entirely rather than defaulted.
    pub fn parse(raw: &str) -> Result<Option<Self>, DirectiveError> {
        let Some((keyword, rule)) = raw.split_once(':') else {
            return Err(DirectiveError::MalformedDirective(raw.to_string()));
        };
        let Some(data_type) = DataType::from_keyword(keyword) else {
            return Err(DirectiveError::UnknownDataType {
                data_type: keyword.to_string(),
                raw: raw.to_string(),
            });
        };

        if data_type == DataType::Timestamp {
            if rule.is_empty() {
                return Ok(Some(Directive::CurrentTime));
            }
            warn!(rule, "timestamp does not support a rule; the field will be skipped");
            return Ok(None);
        }

        let directive = match rule {
            "" => match data_type {
                DataType::Int => Directive::Null,
                _ => Directive::EmptyString,
            },
            "rand" => match data_type {
                DataType::Int => Directive::RandomInt,
                _ => Directive::RandomUuid,
            },
            _ if rule.starts_with('[') && rule.ends_with(']') => {
                Directive::OneOf(parse_literal_list(raw, rule, data_type)?)
            }
            _ if rule.starts_with("rand(") && rule.ends_with(')') => {
                if data_type != DataType::Int {
                    return Err(invalid_rule(
                        raw,
                        format!("rand(a, b) requires type int, not {data_type}"),
                    ));
                }
                let (min, max) = parse_range_args(raw, rule)?;
                Directive::IntRange { min, max }
            }
            _ => Directive::Static(parse_literal(raw, rule, data_type)?),
        };
        Ok(Some(directive))
    }
}

fn invalid_rule(raw: &str, reason: impl Into<String>) -> DirectiveError {
    DirectiveError::InvalidRule {
        raw: raw.to_string(),
        reason: reason.into(),
    }
}

/// Coerce a standalone rule value to the declared data type.
fn parse_literal(raw: &str, text: &str, data_type: DataType) -> Result<Literal, DirectiveError> {
    match data_type {
        DataType::Int => text
            .trim()
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| invalid_rule(raw, format!("{text:?} is not an integer"))),
        DataType::Str => Ok(Literal::Str(text.to_string())),
        DataType::Timestamp => Err(invalid_rule(raw, "timestamp does not take a literal")),
    }
}

/// Parse the two integer arguments of a `rand(a, b)` rule.
fn parse_range_args(raw: &str, rule: &str) -> Result<(i64, i64), DirectiveError> {
    let inner = &rule["rand(".len()..rule.len() - 1];
    let args: Vec<&str> = inner.split(',').collect();
    if args.len() != 2 {
        return Err(invalid_rule(
            raw,
            format!("rand takes exactly two arguments, got {}", args.len()),
        ));
    }
    let parse_bound = |text: &str| {
        text.trim()
            .parse::<i64>()
            .map_err(|_| invalid_rule(raw, format!("{text:?} is not an integer bound")))
    };
    Ok((parse_bound(args[0])?, parse_bound(args[1])?))
}

/// Parse a bracketed list rule into typed literals.
///
/// Every element must match the declared data type: integer lists hold bare
/// integers, string lists hold quoted strings. Mixed or empty lists are
/// rejected.
fn parse_literal_list(
    raw: &str,
    rule: &str,
    data_type: DataType,
) -> Result<Vec<Literal>, DirectiveError> {
    let inner = rule[1..rule.len() - 1].trim();
    if inner.is_empty() {
        return Err(invalid_rule(raw, "list must not be empty"));
    }

    let mut literals = Vec::new();
    for element in split_list_elements(inner).ok_or_else(|| invalid_rule(raw, "unbalanced quote in list"))? {
        let element = element.trim();
        let literal = parse_list_element(raw, element)?;
        match (&literal, data_type) {
            (Literal::Int(_), DataType::Int) | (Literal::Str(_), DataType::Str) => {
                literals.push(literal)
            }
            _ => {
                return Err(invalid_rule(
                    raw,
                    format!("list element {element} does not match type {data_type}"),
                ))
            }
        }
    }
    Ok(literals)
}

/// Parse one list element: a quoted string or a bare integer.
fn parse_list_element(raw: &str, element: &str) -> Result<Literal, DirectiveError> {
    if element.len() >= 2 {
        let first = element.chars().next();
        let last = element.chars().last();
        if (first == Some('\'') && last == Some('\'')) || (first == Some('"') && last == Some('"'))
        {
            return Ok(Literal::Str(element[1..element.len() - 1].to_string()));
        }
    }
    element
        .parse::<i64>()
        .map(Literal::Int)
        .map_err(|_| invalid_rule(raw, format!("{element:?} is not a valid list element")))
}

/// Split the inside of a bracketed list on commas, honoring single and
/// double quotes. Returns `None` on an unterminated quote.
fn split_list_elements(inner: &str) -> Option<Vec<&str>> {
    let mut elements = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ',' => {
                elements.push(&inner[start..i]);
                start = i + 1;
            }
            None => {}
        }
    }
    if quote.is_some() {
        return None;
    }
    elements.push(&inner[start..]);
    Some(elements)
}
