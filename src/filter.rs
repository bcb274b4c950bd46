//! Filters and the ordered collection they travel in.
//!
//! A [`Filter`] is an immutable field / operator / value triple. A
//! [`Filters`] holds them in insertion order; converters combine them
//! with AND semantics and must preserve that order so generated queries
//! stay deterministic.
//!
//! ```rust
//! use crivo::{Filter, FilterOperator, Filters};
//!
//! let filters = Filters::new()
//!     .add(Filter::new("status", FilterOperator::Equal, "active"))
//!     .add(Filter::new("age", FilterOperator::Gte, 18));
//!
//! assert_eq!(filters.len(), 2);
//! assert_eq!(filters.all()[0].field(), "status");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CriteriaResult;
use crate::operator::FilterOperator;
use crate::value::{FilterValue, Scalar};

/// Field name and value marker for the match-all filter.
pub const WILDCARD: &str = "*";

/// A single field comparison.
///
/// Filters are immutable once built. The field name takes a
/// `Cow<'static, str>`, so literals stay borrowed while names computed
/// at runtime allocate once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    field: Cow<'static, str>,
    operator: FilterOperator,
    value: FilterValue,
}

impl Filter {
    /// Create a filter from its three parts.
    pub fn new(
        field: impl Into<Cow<'static, str>>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// The filter that matches every record.
    ///
    /// Spelled as the wildcard triple `(*, ==, *)`. Converters check
    /// [`is_match_all`](Self::is_match_all) and skip it rather than
    /// comparing a literal `*` field against records.
    pub fn match_all() -> Self {
        Self {
            field: Cow::Borrowed(WILDCARD),
            operator: FilterOperator::Equal,
            value: FilterValue::Scalar(Scalar::String(WILDCARD.to_string())),
        }
    }

    /// The field name this filter applies to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The value to compare against.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Check if this is the match-all wildcard triple.
    ///
    /// All three parts must match: a filter on a literal field named
    /// `*` with a different operator or value is an ordinary filter.
    pub fn is_match_all(&self) -> bool {
        self.field == WILDCARD
            && self.operator == FilterOperator::Equal
            && matches!(&self.value, FilterValue::Scalar(Scalar::String(s)) if s == WILDCARD)
    }
}

/// An ordered, append-only collection of filters.
///
/// Holds up to four filters inline before spilling to the heap, which
/// covers the typical listing query without an allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters {
    filters: SmallVec<[Filter; 4]>,
}

impl Filters {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from raw `(field, operator, value)` triples.
    ///
    /// This is the transport boundary: operator tags are strings here
    /// and parsing them is the validation step. The first invalid tag
    /// aborts the whole batch.
    pub fn from_values<I, F, O, V>(values: I) -> CriteriaResult<Self>
    where
        I: IntoIterator<Item = (F, O, V)>,
        F: Into<Cow<'static, str>>,
        O: AsRef<str>,
        V: Into<FilterValue>,
    {
        let filters = values
            .into_iter()
            .map(|(field, operator, value)| {
                Ok(Filter::new(field, operator.as_ref().parse()?, value))
            })
            .collect::<CriteriaResult<SmallVec<[Filter; 4]>>>()?;
        Ok(Self { filters })
    }

    /// Append a filter, returning the extended collection.
    pub fn add(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// All filters, in insertion order.
    pub fn all(&self) -> &[Filter] {
        &self.filters
    }

    /// Iterate over the filters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the collection holds no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl From<Vec<Filter>> for Filters {
    fn from(filters: Vec<Filter>) -> Self {
        Self {
            filters: SmallVec::from_vec(filters),
        }
    }
}

impl From<Filter> for Filters {
    fn from(filter: Filter) -> Self {
        Self::new().add(filter)
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Filters {
    type Item = Filter;
    type IntoIter = smallvec::IntoIter<[Filter; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
