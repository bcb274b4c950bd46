//! # crivo
//!
//! Storage-agnostic query criteria for repository-style data access.
//!
//! Criteria describe *what* to fetch, never *how* a backend fetches it.
//! Call sites build a [`Criteria`], repositories accept it, and a
//! per-backend [`CriteriaConverter`] translates it into whatever the
//! storage actually speaks.
//!
//! This crate provides:
//! - Filters over a closed, validated operator set
//! - Typed filter values: scalars, sequences, inclusive ranges
//! - Single-field ordering with an explicit no-ordering marker
//! - Offset windows and keyset pagination
//! - Async [`Repository`] contract with a ready in-memory backend
//!
//! ## Building criteria
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
//! assert!(criteria.is_paginated());
//! ```
//!
//! The match-everything query is its own type:
//!
//! ```rust
//! use crivo::{AnyCriteria, Criteria};
//!
//! let everything = AnyCriteria::new();
//! assert!(everything.filters().all()[0].is_match_all());
//! assert!(everything.order().is_none());
//! ```
//!
//! ## Raw values at the boundary
//!
//! Operator and direction tags arrive as strings from transports, and
//! parsing them is the validation step:
//!
//! ```rust
//! use crivo::{FilterValue, Filters, Order};
//!
//! let filters = Filters::from_values([
//!     ("status", "==", FilterValue::from("active")),
//!     ("age", ">=", FilterValue::from(18)),
//! ])
//! .unwrap();
//! assert_eq!(filters.len(), 2);
//!
//! // Tags outside the closed set never survive construction.
//! assert!(Filters::from_values([("status", "=", FilterValue::from("active"))]).is_err());
//! assert!(Order::from_values("created_at", Some("desc")).is_err());
//! ```
//!
//! ## In-memory evaluation
//!
//! The [`memory`] module is both a small usable backend and the
//! executable definition of the matching semantics:
//!
//! ```rust
//! use crivo::memory::{FieldLookup, MemoryConverter, MemoryQuery};
//! use crivo::{CriteriaConverter, Filter, FilterOperator, Order, QueryCriteria, Scalar};
//! use indexmap::IndexMap;
//!
//! fn person(id: i64, age: i64) -> IndexMap<String, Scalar> {
//!     IndexMap::from([
//!         ("id".to_string(), Scalar::Int(id)),
//!         ("age".to_string(), Scalar::Int(age)),
//!     ])
//! }
//!
//! let criteria = QueryCriteria::new()
//!     .filter(Filter::new("age", FilterOperator::Gte, 18))
//!     .order_by(Order::desc("age"))
//!     .with_limit(2);
//!
//! let mut query = MemoryQuery::new(vec![person(1, 34), person(2, 17), person(3, 25)]);
//! MemoryConverter.apply(&mut query, &criteria).unwrap();
//!
//! let ages: Vec<Scalar> = query.records().iter().filter_map(|p| p.field("age")).collect();
//! assert_eq!(ages, vec![Scalar::Int(34), Scalar::Int(25)]);
//! ```
//!
//! ## Over the wire
//!
//! Criteria serialize to plain JSON, with tags validated on the way
//! back in:
//!
//! ```rust
//! use crivo::{Criteria, QueryCriteria};
//!
//! let criteria: QueryCriteria = serde_json::from_str(
//!     r#"{
//!         "filters": [{"field": "status", "operator": "==", "value": "active"}],
//!         "order": {"field": "created_at", "direction": "DESC"},
//!         "limit": 10
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(criteria.limit(), Some(10));
//! ```

pub mod converter;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod logging;
pub mod memory;
pub mod operator;
pub mod order;
pub mod repository;
pub mod value;

// Re-export criteria types
pub use converter::CriteriaConverter;
pub use criteria::{AnyCriteria, Criteria, QueryCriteria};
pub use error::{CriteriaError, CriteriaResult};
pub use filter::{Filter, Filters, WILDCARD};
pub use operator::FilterOperator;
pub use order::{Direction, Order};
pub use value::{FilterValue, Scalar};

// Re-export repository contracts and the in-memory backend
pub use memory::{FieldLookup, MemoryConverter, MemoryQuery, MemoryRepository};
pub use repository::{Entity, Repository};

// Re-export logging utilities
pub use logging::{
    get_log_format, get_log_level, init as init_logging, init_debug, init_with_level,
    is_debug_enabled,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::converter::CriteriaConverter;
    pub use crate::criteria::{AnyCriteria, Criteria, QueryCriteria};
    pub use crate::error::{CriteriaError, CriteriaResult};
    pub use crate::filter::{Filter, Filters};
    pub use crate::operator::FilterOperator;
    pub use crate::order::{Direction, Order};
    pub use crate::repository::{Entity, Repository};
    pub use crate::value::{FilterValue, Scalar};
}
