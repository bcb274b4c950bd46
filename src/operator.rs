//! Comparison operators for filters.
//!
//! Operators form a closed set, each bound to a single canonical tag.
//! Tags are what travel over the wire (query strings, JSON bodies,
//! message payloads); parsing one back into a [`FilterOperator`] is the
//! validation step, so an unknown tag never survives past construction.
//!
//! ```rust
//! use crivo::FilterOperator;
//!
//! let op: FilterOperator = ">=".parse().unwrap();
//! assert_eq!(op, FilterOperator::Gte);
//! assert_eq!(op.as_str(), ">=");
//!
//! // Only canonical tags are accepted.
//! assert!("=".parse::<FilterOperator>().is_err());
//! assert!("like".parse::<FilterOperator>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;

/// A comparison operator paired with a field and value in a [`Filter`].
///
/// The word tags (`LIKE`, `IN`, ...) are uppercase with underscores and
/// matching is case sensitive. Equality is spelled `==`; a bare `=` is
/// not a valid tag.
///
/// [`Filter`]: crate::Filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterOperator {
    /// Equality (`==`).
    Equal,
    /// Inequality (`!=`).
    NotEqual,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Gte,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Lte,
    /// Pattern match (`LIKE`), with `%` and `_` wildcards.
    Like,
    /// Negated pattern match (`NOT_LIKE`).
    NotLike,
    /// Membership in a sequence (`IN`).
    In,
    /// Absence from a sequence (`NOT_IN`).
    NotIn,
    /// Field is null or absent (`IS_NULL`).
    IsNull,
    /// Field is present and non-null (`IS_NOT_NULL`).
    IsNotNull,
    /// Inclusive range check (`BETWEEN`).
    Between,
}

impl FilterOperator {
    /// Every operator, in declaration order.
    pub const ALL: [FilterOperator; 13] = [
        Self::Equal,
        Self::NotEqual,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::IsNotNull,
        Self::Between,
    ];

    /// The canonical tag for this operator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT_LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::IsNull => "IS_NULL",
            Self::IsNotNull => "IS_NOT_NULL",
            Self::Between => "BETWEEN",
        }
    }

    /// Whether this operator ignores the filter value entirely.
    ///
    /// Null checks are decided by the field alone, so converters skip
    /// value binding for them.
    pub const fn is_null_check(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl FromStr for FilterOperator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            "LIKE" => Self::Like,
            "NOT_LIKE" => Self::NotLike,
            "IN" => Self::In,
            "NOT_IN" => Self::NotIn,
            "IS_NULL" => Self::IsNull,
            "IS_NOT_NULL" => Self::IsNotNull,
            "BETWEEN" => Self::Between,
            _ => return Err(CriteriaError::InvalidOperator(s.to_string())),
        })
    }
}

impl TryFrom<String> for FilterOperator {
    type Error = CriteriaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
