//! OData-style filter expressions sent upstream as `$filter`.
//!
//! A [`Filter`] is only ever produced by [`sanitize`]-ing a caller-supplied
//! expression or by a [`FieldRule`] interpolating an escaped literal, so the
//! fetcher never sees a raw, unchecked string.

use std::fmt;

use super::error::RoadmapError;

/// Characters removed from free-form expressions before keyword checks.
const STRIPPED_CHARS: &[char] = &[';', '\\'];

/// Words that never appear in a read-only query.
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "DROP", "DELETE", "INSERT", "UPDATE", "EXEC", "EXECUTE", "CREATE", "ALTER", "TRUNCATE",
    "MERGE",
];

/// A filter expression that is safe to forward to the roadmap API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter(String);

impl Filter {
    /// Sanitize a caller-supplied expression.
    ///
    /// Returns `Ok(None)` when nothing is left after stripping and trimming.
    pub fn from_expression(expr: &str) -> Result<Option<Self>, RoadmapError> {
        let cleaned = sanitize(expr)?;
        if cleaned.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Self(cleaned)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip statement separators and escape characters, then reject any
/// expression containing a forbidden keyword as a whole word.
pub fn sanitize(expr: &str) -> Result<String, RoadmapError> {
    let stripped: String = expr.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();

    for token in words(&stripped) {
        let upper = token.to_ascii_uppercase();
        if FORBIDDEN_KEYWORDS.contains(&upper.as_str()) {
            return Err(RoadmapError::InvalidFilter(format!(
                "expression contains forbidden keyword: {upper}"
            )));
        }
    }

    Ok(stripped.trim().to_string())
}

/// Double every single quote so the value stays inside a `'...'` literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

fn words(expr: &str) -> impl Iterator<Item = &str> {
    expr.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, Copy)]
pub enum Literal<'a> {
    Str(&'a str),
    Int(u64),
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "'{}'", escape_literal(s)),
            Literal::Int(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predicate {
    /// `field eq literal`
    Eq,
    /// `field/any(v:v eq literal)` over a list-valued field.
    AnyEq(char),
}

/// One field comparison, parameterized by its literal at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    field: &'static str,
    predicate: Predicate,
}

impl FieldRule {
    pub const ID: FieldRule = FieldRule::equals("id");
    pub const STATUS: FieldRule = FieldRule::equals("status");
    pub const PRODUCT: FieldRule = FieldRule::any_equals("products", 'p');
    pub const RELEASE_RING: FieldRule = FieldRule::any_equals("releaseRings", 'r');
    pub const GENERAL_AVAILABILITY_DATE: FieldRule = FieldRule::equals("generalAvailabilityDate");
    pub const PREVIEW_AVAILABILITY_DATE: FieldRule = FieldRule::equals("previewAvailabilityDate");

    const fn equals(field: &'static str) -> Self {
        Self { field, predicate: Predicate::Eq }
    }

    const fn any_equals(field: &'static str, var: char) -> Self {
        Self { field, predicate: Predicate::AnyEq(var) }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Build the filter selecting items whose field matches `literal`.
    pub fn matching(&self, literal: Literal<'_>) -> Filter {
        let expr = match self.predicate {
            Predicate::Eq => format!("{} eq {literal}", self.field),
            Predicate::AnyEq(v) => format!("{}/any({v}:{v} eq {literal})", self.field),
        };
        Filter(expr)
    }
}
