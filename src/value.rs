//! Values carried by filters.
//!
//! A [`Scalar`] is one typed value. A [`FilterValue`] is what a filter
//! actually holds: a scalar, a sequence of scalars for membership
//! operators, or an inclusive range for `BETWEEN`. Keeping the shapes
//! distinct lets converters reject or skip pairings that make no sense
//! instead of guessing at the meaning of a bare string.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single typed value.
///
/// Serializes to the matching JSON primitive, so `Scalar::Int(42)` is
/// `42` on the wire, not a wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering between two scalars, if they are comparable.
    ///
    /// Ints and floats compare numerically against each other, exactly
    /// at every magnitude, strings byte-lexicographically, bools as
    /// `false < true`. Null compares to nothing, itself included, and
    /// neither do values of mixed type. `None` means unknown, which
    /// filters treat as no match.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => compare_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => compare_int_float(*b, *a).map(Ordering::reverse),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Exact ordering between an integer and a float.
///
/// Casting the int to `f64` rounds above 2^53 and would report
/// neighboring values as equal. The float's whole part converts to
/// `i64` exactly for every float inside the `i64` range, so the
/// comparison goes that way instead, with the fractional part
/// breaking whole-part ties.
fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63. Every finite float at or beyond this magnitude is outside
    // the i64 range.
    const I64_SPAN: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= I64_SPAN {
        return Some(Ordering::Less);
    }
    if float < -I64_SPAN {
        return Some(Ordering::Greater);
    }

    let whole = float.trunc();
    Some(int.cmp(&(whole as i64)).then(whole.partial_cmp(&float)?))
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// The value side of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single value.
    Scalar(Scalar),
    /// An ordered list of values, for `IN` and `NOT_IN`.
    Sequence(Vec<Scalar>),
    /// An inclusive range, for `BETWEEN`.
    Range {
        /// Lower bound.
        from: Scalar,
        /// Upper bound.
        to: Scalar,
    },
}

impl FilterValue {
    /// Create a sequence value.
    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Create an inclusive range value.
    pub fn range(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Self {
        Self::Range {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Borrow the scalar, if this is a scalar value.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the sequence, if this is a sequence value.
    pub fn as_sequence(&self) -> Option<&[Scalar]> {
        match self {
            Self::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// Borrow the range bounds, if this is a range value.
    pub fn as_range(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            Self::Range { from, to } => Some((from, to)),
            _ => None,
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Scalar(v.into())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        Self::Scalar(v.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}
