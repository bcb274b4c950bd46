//! Query criteria: what to match, how to sort, which page.
//!
//! [`Criteria`] is the capability trait repositories accept. It bundles
//! the three querying concerns into one read-only surface:
//!
//! - **Filters**: field comparisons, combined with AND
//! - **Order**: a single sort field and direction
//! - **Pagination**: offset windowing (`limit` / `offset`) or keyset
//!   paging (`pointer`)
//!
//! [`QueryCriteria`] is the owned, buildable implementation used at
//! call sites. [`AnyCriteria`] is the match-everything marker for "give
//! me all of it" queries.
//!
//! # Examples
//!
//! Building criteria for a listing endpoint:
//!
//! ```rust
//! use crivo::{Criteria, Filter, FilterOperator, Order, QueryCriteria};
//!
//! let criteria = QueryCriteria::new()
//!     .filter(Filter::new("status", FilterOperator::Equal, "active"))
//!     .filter(Filter::new("age", FilterOperator::Gte, 18))
//!     .order_by(Order::desc("created_at"))
//!     .with_limit(10)
//!     .with_offset(0);
//!
//! assert_eq!(criteria.filters().len(), 2);
//! assert_eq!(criteria.limit(), Some(10));
//! assert!(criteria.is_paginated());
//! ```
//!
//! Fetching everything:
//!
//! ```rust
//! use crivo::{AnyCriteria, Criteria};
//!
//! let criteria = AnyCriteria::new();
//! assert!(criteria.filters().all()[0].is_match_all());
//! assert!(criteria.order().is_none());
//! assert!(!criteria.is_paginated());
//! ```

use serde::{Deserialize, Serialize};

use crate::filter::{Filter, Filters};
use crate::order::Order;

/// Read-only description of a query.
///
/// Implementations return owned values so callers never borrow into
/// the criteria's internals; the empty cases are cheap (an empty
/// [`Filters`] stays inline, [`Order::none`] is a marker).
pub trait Criteria: Send + Sync {
    /// Filters to apply, in insertion order, combined with AND.
    fn filters(&self) -> Filters;

    /// Ordering for the results.
    fn order(&self) -> Order;

    /// Maximum number of records to return.
    fn limit(&self) -> Option<u64>;

    /// Number of records to skip from the start of the result set.
    ///
    /// `Some(0)` is a deliberate "first page" request, not the same as
    /// `None`.
    fn offset(&self) -> Option<u64>;

    /// Exclusive lower bound on the record id, for keyset paging.
    ///
    /// When set, converters page past the pointed-at record instead of
    /// counting rows, and `offset` is ignored.
    fn pointer(&self) -> Option<i64>;

    /// Check if any pagination input is set.
    fn is_paginated(&self) -> bool {
        self.limit().is_some() || self.offset().is_some() || self.pointer().is_some()
    }
}

impl<C: Criteria + ?Sized> Criteria for &C {
    fn filters(&self) -> Filters {
        (**self).filters()
    }

    fn order(&self) -> Order {
        (**self).order()
    }

    fn limit(&self) -> Option<u64> {
        (**self).limit()
    }

    fn offset(&self) -> Option<u64> {
        (**self).offset()
    }

    fn pointer(&self) -> Option<i64> {
        (**self).pointer()
    }
}

impl<C: Criteria + ?Sized> Criteria for Box<C> {
    fn filters(&self) -> Filters {
        (**self).filters()
    }

    fn order(&self) -> Order {
        (**self).order()
    }

    fn limit(&self) -> Option<u64> {
        (**self).limit()
    }

    fn offset(&self) -> Option<u64> {
        (**self).offset()
    }

    fn pointer(&self) -> Option<i64> {
        (**self).pointer()
    }
}

/// The criteria that matches everything.
///
/// Carries the wildcard filter, the no-ordering marker, and no
/// pagination: every record, storage order, no windowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyCriteria;

impl AnyCriteria {
    /// Create the match-everything criteria.
    pub fn new() -> Self {
        Self
    }
}

impl Criteria for AnyCriteria {
    fn filters(&self) -> Filters {
        Filters::from(Filter::match_all())
    }

    fn order(&self) -> Order {
        Order::none()
    }

    fn limit(&self) -> Option<u64> {
        None
    }

    fn offset(&self) -> Option<u64> {
        None
    }

    fn pointer(&self) -> Option<i64> {
        None
    }
}

/// An owned criteria assembled through a consuming builder.
///
/// Every part is optional; the default value filters nothing, keeps
/// storage order, and applies no windowing. Serializes with empty
/// parts omitted, so the default round-trips as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCriteria {
    #[serde(skip_serializing_if = "Filters::is_empty")]
    filters: Filters,
    #[serde(skip_serializing_if = "Order::is_none")]
    order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pointer: Option<i64>,
}

impl QueryCriteria {
    /// Create an empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters = self.filters.add(filter);
        self
    }

    /// Replace the whole filter collection.
    pub fn with_filters(mut self, filters: impl Into<Filters>) -> Self {
        self.filters = filters.into();
        self
    }

    /// Set the ordering.
    pub fn order_by(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Set the maximum number of records to return.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of records to skip.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the keyset pointer, the id of the last record already seen.
    pub fn with_pointer(mut self, pointer: i64) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

impl Criteria for QueryCriteria {
    fn filters(&self) -> Filters {
        self.filters.clone()
    }

    fn order(&self) -> Order {
        self.order.clone()
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }

    fn offset(&self) -> Option<u64> {
        self.offset
    }

    fn pointer(&self) -> Option<i64> {
        self.pointer
    }
}
