//! Result ordering.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CriteriaError, CriteriaResult};
use crate::filter::WILDCARD;

/// Sort direction for ordered results.
///
/// Tags are uppercase and case sensitive, like the operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Direction {
    /// The canonical tag for this direction.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Check if this is descending order.
    pub const fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Asc
    }
}

impl FromStr for Direction {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(CriteriaError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = CriteriaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering on a single field.
///
/// The field name `*` is reserved as the no-ordering marker, so an
/// `Order` value always exists and "unsorted" never needs an option.
/// Unsorted results keep their storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    field: Cow<'static, str>,
    #[serde(default)]
    direction: Direction,
}

impl Order {
    /// Create an ordering on a field.
    pub fn new(field: impl Into<Cow<'static, str>>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending ordering.
    pub fn asc(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Create a descending ordering.
    pub fn desc(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new(field, Direction::Desc)
    }

    /// The no-ordering marker.
    pub fn none() -> Self {
        Self::asc(WILDCARD)
    }

    /// Build an ordering from raw values, defaulting to ascending.
    ///
    /// The direction tag is validated here; `Some("asc")` is as invalid
    /// as `Some("sideways")`.
    pub fn from_values(
        field: impl Into<Cow<'static, str>>,
        direction: Option<&str>,
    ) -> CriteriaResult<Self> {
        let direction = match direction {
            Some(tag) => tag.parse()?,
            None => Direction::default(),
        };
        Ok(Self::new(field, direction))
    }

    /// The field to order by.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if this orders ascending.
    pub fn is_asc(&self) -> bool {
        self.direction == Direction::Asc
    }

    /// Check if this orders descending.
    pub fn is_desc(&self) -> bool {
        self.direction.is_desc()
    }

    /// Check if this is the no-ordering marker.
    ///
    /// Only the field is inspected; the marker's direction carries no
    /// meaning.
    pub fn is_none(&self) -> bool {
        self.field == WILDCARD
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}
