//! In-memory criteria evaluation.
//!
//! The reference backend. Records expose their fields through
//! [`FieldLookup`], [`MemoryConverter`] narrows a [`MemoryQuery`]
//! against criteria, and [`MemoryRepository`] wires the pieces into
//! the [`Repository`] contract. Useful on its own for tests and small
//! data sets, and as the executable definition of filter semantics for
//! backend authors.
//!
//! ```rust
//! use crivo::memory::{MemoryConverter, MemoryQuery};
//! use crivo::{CriteriaConverter, Filter, FilterOperator, QueryCriteria, Scalar};
//! use indexmap::IndexMap;
//!
//! let mut ada = IndexMap::new();
//! ada.insert("name".to_string(), Scalar::from("ada"));
//! ada.insert("age".to_string(), Scalar::from(36));
//!
//! let criteria = QueryCriteria::new().filter(Filter::new("age", FilterOperator::Gte, 18));
//! let mut query = MemoryQuery::new(vec![ada]);
//! MemoryConverter.apply(&mut query, &criteria).unwrap();
//! assert_eq!(query.len(), 1);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::converter::CriteriaConverter;
use crate::criteria::Criteria;
use crate::filter::Filter;
use crate::operator::FilterOperator;
use crate::order::Order;
use crate::repository::{Entity, Repository};
use crate::value::Scalar;

/// Field consulted for keyset pagination.
///
/// A criteria `pointer` keeps only records whose value under this
/// field compares strictly greater than the pointer.
pub const ID_FIELD: &str = "id";

/// Exposes record fields by name for in-memory evaluation.
///
/// Returning `None` means the record has no such field, which every
/// operator except `IS_NULL` treats as no match.
pub trait FieldLookup {
    /// The value of the named field, if the record has it.
    fn field(&self, name: &str) -> Option<Scalar>;
}

impl FieldLookup for IndexMap<String, Scalar> {
    fn field(&self, name: &str) -> Option<Scalar> {
        self.get(name).cloned()
    }
}

impl FieldLookup for HashMap<String, Scalar> {
    fn field(&self, name: &str) -> Option<Scalar> {
        self.get(name).cloned()
    }
}

/// A record set being narrowed by criteria.
#[derive(Debug, Clone)]
pub struct MemoryQuery<R> {
    records: Vec<R>,
}

impl<R> MemoryQuery<R> {
    /// Create a query over the given records, in storage order.
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// The records currently in the set.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consume the query, returning the records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Number of records currently in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Applies criteria to in-memory record sets.
///
/// Evaluation is total rather than fallible: a comparison whose
/// operands cannot be compared (mixed types, a `BETWEEN` without a
/// range value, a `LIKE` against a number) matches nothing instead of
/// erroring. `IN` with an empty sequence matches nothing; `NOT_IN`
/// with an empty sequence matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryConverter;

impl MemoryConverter {
    /// Create a converter.
    pub fn new() -> Self {
        Self
    }
}

impl<R: FieldLookup> CriteriaConverter<MemoryQuery<R>> for MemoryConverter {
    type Error = Infallible;

    fn apply(&self, query: &mut MemoryQuery<R>, criteria: &dyn Criteria) -> Result<(), Infallible> {
        let filters = criteria.filters();
        if !filters.is_empty() {
            query
                .records
                .retain(|record| filters.iter().all(|filter| filter_matches(record, filter)));
        }

        let order = criteria.order();
        if !order.is_none() {
            sort_records(&mut query.records, &order);
        }

        if let Some(pointer) = criteria.pointer() {
            // Keyset paging wins over offset.
            let pointer = Scalar::Int(pointer);
            query.records.retain(|record| {
                record
                    .field(ID_FIELD)
                    .is_some_and(|id| id.compare(&pointer) == Some(Ordering::Greater))
            });
            if let Some(limit) = criteria.limit() {
                truncate(&mut query.records, limit);
            }
        } else {
            if let Some(offset) = criteria.offset() {
                let skip = usize::try_from(offset)
                    .unwrap_or(usize::MAX)
                    .min(query.records.len());
                query.records.drain(..skip);
            }
            if let Some(limit) = criteria.limit() {
                truncate(&mut query.records, limit);
            }
        }

        tracing::debug!(
            filters = filters.len(),
            order = %order,
            matched = query.records.len(),
            "Applied criteria to record set"
        );
        Ok(())
    }
}

fn truncate<R>(records: &mut Vec<R>, limit: u64) {
    if (records.len() as u64) > limit {
        records.truncate(limit as usize);
    }
}

fn sort_records<R: FieldLookup>(records: &mut [R], order: &Order) {
    let field = order.field();
    let descending = order.is_desc();
    // Stable sort; incomparable pairs keep their relative order.
    records.sort_by(|a, b| {
        let ordering = match (a.field(field), b.field(field)) {
            (Some(left), Some(right)) => left.compare(&right).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        if descending { ordering.reverse() } else { ordering }
    });
}

fn filter_matches<R: FieldLookup>(record: &R, filter: &Filter) -> bool {
    if filter.is_match_all() {
        return true;
    }

    let current = record.field(filter.field());

    if filter.operator().is_null_check() {
        let is_null = current.is_none_or(|scalar| scalar.is_null());
        return (filter.operator() == FilterOperator::IsNull) == is_null;
    }

    // Value comparisons never match a missing or null field.
    let Some(current) = current else {
        return false;
    };
    if current.is_null() {
        return false;
    }

    match filter.operator() {
        FilterOperator::Equal => compare(&current, filter) == Some(Ordering::Equal),
        FilterOperator::NotEqual => {
            matches!(compare(&current, filter), Some(ordering) if ordering != Ordering::Equal)
        }
        FilterOperator::Gt => compare(&current, filter) == Some(Ordering::Greater),
        FilterOperator::Gte => {
            matches!(compare(&current, filter), Some(Ordering::Greater | Ordering::Equal))
        }
        FilterOperator::Lt => compare(&current, filter) == Some(Ordering::Less),
        FilterOperator::Lte => {
            matches!(compare(&current, filter), Some(Ordering::Less | Ordering::Equal))
        }
        FilterOperator::Like => like(&current, filter, false),
        FilterOperator::NotLike => like(&current, filter, true),
        FilterOperator::In => contains(&current, filter, false),
        FilterOperator::NotIn => contains(&current, filter, true),
        FilterOperator::Between => between(&current, filter),
        FilterOperator::IsNull | FilterOperator::IsNotNull => false,
    }
}

fn compare(current: &Scalar, filter: &Filter) -> Option<Ordering> {
    filter
        .value()
        .as_scalar()
        .and_then(|scalar| current.compare(scalar))
}

fn like(current: &Scalar, filter: &Filter, negated: bool) -> bool {
    let pattern = filter.value().as_scalar().and_then(Scalar::as_str);
    let (Some(pattern), Some(text)) = (pattern, current.as_str()) else {
        return false;
    };
    like_match(pattern, text) != negated
}

fn contains(current: &Scalar, filter: &Filter, negated: bool) -> bool {
    let Some(sequence) = filter.value().as_sequence() else {
        return false;
    };
    let found = sequence
        .iter()
        .any(|candidate| current.compare(candidate) == Some(Ordering::Equal));
    found != negated
}

fn between(current: &Scalar, filter: &Filter) -> bool {
    let Some((from, to)) = filter.value().as_range() else {
        return false;
    };
    current.compare(from).is_some_and(|ordering| ordering != Ordering::Less)
        && current.compare(to).is_some_and(|ordering| ordering != Ordering::Greater)
}

/// SQL LIKE over chars: `%` matches any run, `_` exactly one char.
/// Case sensitive, no escape sequence.
fn like_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((wild, start)) = backtrack {
            // Let the last `%` swallow one more char and retry.
            p = wild + 1;
            t = start + 1;
            backtrack = Some((wild, start + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '%' {
        p += 1;
    }
    p == pattern.len()
}

/// Thread-safe in-memory repository.
///
/// `matching` snapshots the records under a read lock and evaluates
/// criteria on the snapshot, so long evaluations never block writers.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    entities: RwLock<Vec<E>>,
}

impl<E> MemoryRepository<E> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository seeded with entities, in storage order.
    pub fn with_entities(entities: Vec<E>) -> Self {
        Self {
            entities: RwLock::new(entities),
        }
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Check if no entities are stored.
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> Repository for MemoryRepository<E>
where
    E: Entity + FieldLookup + Clone,
{
    type Entity = E;
    type Error = Infallible;

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, Infallible> {
        Ok(self
            .entities
            .read()
            .iter()
            .find(|entity| entity.id() == *id)
            .cloned())
    }

    async fn save(&self, entity: E) -> Result<bool, Infallible> {
        let mut entities = self.entities.write();
        match entities.iter_mut().find(|existing| existing.id() == entity.id()) {
            Some(existing) => {
                *existing = entity;
                Ok(false)
            }
            None => {
                entities.push(entity);
                Ok(true)
            }
        }
    }

    async fn delete(&self, entity: &E) -> Result<bool, Infallible> {
        let mut entities = self.entities.write();
        let before = entities.len();
        entities.retain(|existing| existing.id() != entity.id());
        Ok(entities.len() != before)
    }

    async fn matching(&self, criteria: &dyn Criteria) -> Result<Vec<E>, Infallible> {
        let snapshot = self.entities.read().clone();
        let mut query = MemoryQuery::new(snapshot);
        MemoryConverter.apply(&mut query, criteria)?;
        Ok(query.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{AnyCriteria, QueryCriteria};
    use crate::value::FilterValue;

    fn record(values: &[(&str, Scalar)]) -> IndexMap<String, Scalar> {
        values
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Five people; dora has no email field at all, bruno's is null.
    fn people() -> Vec<IndexMap<String, Scalar>> {
        vec![
            record(&[
                ("id", 1.into()),
                ("name", "ana".into()),
                ("age", 34.into()),
                ("status", "active".into()),
                ("email", "ana@example.com".into()),
            ]),
            record(&[
                ("id", 2.into()),
                ("name", "bruno".into()),
                ("age", 17.into()),
                ("status", "active".into()),
                ("email", Scalar::Null),
            ]),
            record(&[
                ("id", 3.into()),
                ("name", "carla".into()),
                ("age", 25.into()),
                ("status", "inactive".into()),
                ("email", "carla@example.com".into()),
            ]),
            record(&[
                ("id", 4.into()),
                ("name", "dora".into()),
                ("age", 25.into()),
                ("status", "active".into()),
            ]),
            record(&[
                ("id", 5.into()),
                ("name", "emil".into()),
                ("age", 41.into()),
                ("status", "banned".into()),
                ("email", "emil@example.com".into()),
            ]),
        ]
    }

    fn ids_matching(criteria: &dyn Criteria) -> Vec<i64> {
        let mut query = MemoryQuery::new(people());
        MemoryConverter.apply(&mut query, criteria).unwrap();
        query
            .into_records()
            .into_iter()
            .map(|record| match record.field(ID_FIELD) {
                Some(Scalar::Int(id)) => id,
                other => panic!("record lost its id: {:?}", other),
            })
            .collect()
    }

    fn one_filter(filter: Filter) -> QueryCriteria {
        QueryCriteria::new().filter(filter)
    }

    // ==================== Filter Semantics ====================

    #[test]
    fn test_equal_and_not_equal() {
        let active = one_filter(Filter::new("status", FilterOperator::Equal, "active"));
        assert_eq!(ids_matching(&active), [1, 2, 4]);

        let not_active = one_filter(Filter::new("status", FilterOperator::NotEqual, "active"));
        assert_eq!(ids_matching(&not_active), [3, 5]);
    }

    #[test]
    fn test_type_mismatch_matches_nothing() {
        // Ages are ints; a string operand is unknown, not coerced.
        let equal = one_filter(Filter::new("age", FilterOperator::Equal, "25"));
        assert_eq!(ids_matching(&equal), [] as [i64; 0]);

        // Unknown stays unknown under negation.
        let not_equal = one_filter(Filter::new("age", FilterOperator::NotEqual, "25"));
        assert_eq!(ids_matching(&not_equal), [] as [i64; 0]);
    }

    #[test]
    fn test_comparisons() {
        let adult = one_filter(Filter::new("age", FilterOperator::Gte, 18));
        assert_eq!(ids_matching(&adult), [1, 3, 4, 5]);

        let over_25 = one_filter(Filter::new("age", FilterOperator::Gt, 25));
        assert_eq!(ids_matching(&over_25), [1, 5]);

        let minor = one_filter(Filter::new("age", FilterOperator::Lt, 18));
        assert_eq!(ids_matching(&minor), [2]);

        let at_most_25 = one_filter(Filter::new("age", FilterOperator::Lte, 25));
        assert_eq!(ids_matching(&at_most_25), [2, 3, 4]);
    }

    #[test]
    fn test_numeric_comparison_across_int_and_float() {
        let records = vec![
            record(&[("id", 1.into()), ("score", 4.5.into())]),
            record(&[("id", 2.into()), ("score", 4.into())]),
            record(&[("id", 3.into()), ("score", 3.2.into())]),
        ];
        let criteria = one_filter(Filter::new("score", FilterOperator::Gte, 4));
        let mut query = MemoryQuery::new(records);
        MemoryConverter.apply(&mut query, &criteria).unwrap();
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_like_patterns() {
        let ends_a = one_filter(Filter::new("name", FilterOperator::Like, "%a"));
        assert_eq!(ids_matching(&ends_a), [1, 3, 4]);

        let starts_an = one_filter(Filter::new("name", FilterOperator::Like, "an%"));
        assert_eq!(ids_matching(&starts_an), [1]);

        let has_r = one_filter(Filter::new("name", FilterOperator::Like, "%r%"));
        assert_eq!(ids_matching(&has_r), [2, 3, 4]);

        let one_char_then_ora = one_filter(Filter::new("name", FilterOperator::Like, "_ora"));
        assert_eq!(ids_matching(&one_char_then_ora), [4]);

        // No wildcards means exact match.
        let exact = one_filter(Filter::new("name", FilterOperator::Like, "emil"));
        assert_eq!(ids_matching(&exact), [5]);

        // Case sensitive.
        let upper = one_filter(Filter::new("name", FilterOperator::Like, "ANA"));
        assert_eq!(ids_matching(&upper), [] as [i64; 0]);
    }

    #[test]
    fn test_not_like() {
        let criteria = one_filter(Filter::new("name", FilterOperator::NotLike, "%a"));
        assert_eq!(ids_matching(&criteria), [2, 5]);

        // A non-string field is unknown for LIKE, negated or not.
        let on_number = one_filter(Filter::new("age", FilterOperator::NotLike, "%1%"));
        assert_eq!(ids_matching(&on_number), [] as [i64; 0]);
    }

    #[test]
    fn test_in_and_not_in() {
        let value = FilterValue::from(vec![17, 41]);
        let picked = one_filter(Filter::new("age", FilterOperator::In, value.clone()));
        assert_eq!(ids_matching(&picked), [2, 5]);

        let rest = one_filter(Filter::new("age", FilterOperator::NotIn, value));
        assert_eq!(ids_matching(&rest), [1, 3, 4]);
    }

    #[test]
    fn test_membership_with_empty_sequence() {
        let none = one_filter(Filter::new("age", FilterOperator::In, FilterValue::sequence::<_, i64>([])));
        assert_eq!(ids_matching(&none), [] as [i64; 0]);

        let all = one_filter(Filter::new("age", FilterOperator::NotIn, FilterValue::sequence::<_, i64>([])));
        assert_eq!(ids_matching(&all), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_membership_needs_a_sequence() {
        let criteria = one_filter(Filter::new("age", FilterOperator::In, 25));
        assert_eq!(ids_matching(&criteria), [] as [i64; 0]);
    }

    #[test]
    fn test_between_is_inclusive() {
        let criteria = one_filter(Filter::new("age", FilterOperator::Between, FilterValue::range(25, 34)));
        assert_eq!(ids_matching(&criteria), [1, 3, 4]);

        // An inverted range holds nothing.
        let inverted = one_filter(Filter::new("age", FilterOperator::Between, FilterValue::range(34, 25)));
        assert_eq!(ids_matching(&inverted), [] as [i64; 0]);

        // BETWEEN without a range value matches nothing.
        let scalar = one_filter(Filter::new("age", FilterOperator::Between, 25));
        assert_eq!(ids_matching(&scalar), [] as [i64; 0]);
    }

    #[test]
    fn test_null_checks() {
        // Explicit null and missing field both count as null.
        let no_email = one_filter(Filter::new("email", FilterOperator::IsNull, Scalar::Null));
        assert_eq!(ids_matching(&no_email), [2, 4]);

        let with_email = one_filter(Filter::new("email", FilterOperator::IsNotNull, Scalar::Null));
        assert_eq!(ids_matching(&with_email), [1, 3, 5]);
    }

    #[test]
    fn test_null_field_never_matches_value_comparisons() {
        let criteria = one_filter(Filter::new("email", FilterOperator::Equal, Scalar::Null));
        assert_eq!(ids_matching(&criteria), [] as [i64; 0]);

        let missing = one_filter(Filter::new("nickname", FilterOperator::NotEqual, "x"));
        assert_eq!(ids_matching(&missing), [] as [i64; 0]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let criteria = QueryCriteria::new()
            .filter(Filter::new("status", FilterOperator::Equal, "active"))
            .filter(Filter::new("age", FilterOperator::Gte, 18));
        assert_eq!(ids_matching(&criteria), [1, 4]);
    }

    #[test]
    fn test_match_all_filter_is_skipped() {
        // No record has a field named `*`; the wildcard must not look one up.
        let criteria = one_filter(Filter::match_all());
        assert_eq!(ids_matching(&criteria), [1, 2, 3, 4, 5]);

        // Mixed with a real filter it changes nothing.
        let mixed = QueryCriteria::new()
            .filter(Filter::match_all())
            .filter(Filter::new("status", FilterOperator::Equal, "active"));
        assert_eq!(ids_matching(&mixed), [1, 2, 4]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        assert_eq!(ids_matching(&QueryCriteria::new()), [1, 2, 3, 4, 5]);
        assert_eq!(ids_matching(&AnyCriteria::new()), [1, 2, 3, 4, 5]);
    }

    // ==================== Ordering ====================

    #[test]
    fn test_sort_ascending_is_stable() {
        let criteria = QueryCriteria::new().order_by(Order::asc("age"));
        // carla and dora tie at 25 and keep insertion order.
        assert_eq!(ids_matching(&criteria), [2, 3, 4, 1, 5]);
    }

    #[test]
    fn test_sort_descending_keeps_tie_order() {
        let criteria = QueryCriteria::new().order_by(Order::desc("age"));
        assert_eq!(ids_matching(&criteria), [5, 1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_by_string_field() {
        let criteria = QueryCriteria::new().order_by(Order::desc("name"));
        assert_eq!(ids_matching(&criteria), [5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_sort_on_absent_field_keeps_storage_order() {
        // Every pair compares unknown, so the stable sort moves nothing.
        let criteria = QueryCriteria::new().order_by(Order::asc("height"));
        assert_eq!(ids_matching(&criteria), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_with_unsortable_records_loses_nothing() {
        // Null and missing emails are incomparable with the rest; the
        // exact placement is unspecified but the set must survive.
        let criteria = QueryCriteria::new().order_by(Order::asc("email"));
        let mut ids = ids_matching(&criteria);
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_ordering_marker_keeps_storage_order() {
        let criteria = QueryCriteria::new().order_by(Order::none());
        assert_eq!(ids_matching(&criteria), [1, 2, 3, 4, 5]);
    }

    // ==================== Pagination ====================

    #[test]
    fn test_offset_and_limit_window() {
        let criteria = QueryCriteria::new().with_offset(1).with_limit(2);
        assert_eq!(ids_matching(&criteria), [2, 3]);

        let first_page = QueryCriteria::new().with_offset(0).with_limit(2);
        assert_eq!(ids_matching(&first_page), [1, 2]);
    }

    #[test]
    fn test_window_edges() {
        let past_the_end = QueryCriteria::new().with_offset(10);
        assert_eq!(ids_matching(&past_the_end), [] as [i64; 0]);

        let nothing = QueryCriteria::new().with_limit(0);
        assert_eq!(ids_matching(&nothing), [] as [i64; 0]);

        let everything = QueryCriteria::new().with_limit(100);
        assert_eq!(ids_matching(&everything), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pointer_pages_past_the_id() {
        let criteria = QueryCriteria::new().with_pointer(2);
        assert_eq!(ids_matching(&criteria), [3, 4, 5]);

        let page = QueryCriteria::new().with_pointer(2).with_limit(2);
        assert_eq!(ids_matching(&page), [3, 4]);
    }

    #[test]
    fn test_pointer_ignores_offset() {
        let criteria = QueryCriteria::new().with_pointer(1).with_offset(3);
        assert_eq!(ids_matching(&criteria), [2, 3, 4, 5]);
    }

    #[test]
    fn test_pointer_applies_after_sort() {
        let criteria = QueryCriteria::new()
            .order_by(Order::desc("id"))
            .with_pointer(3);
        assert_eq!(ids_matching(&criteria), [5, 4]);
    }

    #[test]
    fn test_pointer_past_every_id() {
        let criteria = QueryCriteria::new().with_pointer(99);
        assert_eq!(ids_matching(&criteria), [] as [i64; 0]);
    }

    #[test]
    fn test_filters_sort_and_window_compose() {
        let criteria = QueryCriteria::new()
            .filter(Filter::new("age", FilterOperator::Gte, 18))
            .order_by(Order::desc("age"))
            .with_offset(1)
            .with_limit(2);
        // Matching ids by age desc: 5 (41), 1 (34), 3 (25), 4 (25).
        assert_eq!(ids_matching(&criteria), [1, 3]);
    }

    // ==================== Pattern Matcher ====================

    #[test]
    fn test_like_match_wildcards() {
        assert!(like_match("%", ""));
        assert!(like_match("%", "anything"));
        assert!(like_match("a%c", "abc"));
        assert!(like_match("a%c", "ac"));
        assert!(like_match("%b%", "abc"));
        assert!(like_match("_b_", "abc"));
        assert!(like_match("a__", "abc"));
        assert!(like_match("%.com", "x@y.com"));

        assert!(!like_match("", "a"));
        assert!(!like_match("a", "ab"));
        assert!(!like_match("_", ""));
        assert!(!like_match("a_c", "ac"));
        assert!(!like_match("%d", "abc"));
    }

    #[test]
    fn test_like_match_backtracks_over_repeats() {
        assert!(like_match("%ab", "aab"));
        assert!(like_match("%a_a", "banana"));
        assert!(like_match("a%a%a", "alabama"));
        assert!(!like_match("%aba", "ababab"));
    }

    // ==================== MemoryQuery ====================

    #[test]
    fn test_query_accessors() {
        let query = MemoryQuery::new(people());
        assert_eq!(query.len(), 5);
        assert!(!query.is_empty());
        assert_eq!(query.records().len(), 5);
        assert_eq!(query.into_records().len(), 5);

        let empty: MemoryQuery<IndexMap<String, Scalar>> = MemoryQuery::new(Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_hash_map_records_evaluate_too() {
        let mut record = HashMap::new();
        record.insert("age".to_string(), Scalar::from(30));

        let mut query = MemoryQuery::new(vec![record]);
        let criteria =
            QueryCriteria::new().filter(Filter::new("age", FilterOperator::Gte, 18));
        MemoryConverter.apply(&mut query, &criteria).unwrap();
        assert_eq!(query.len(), 1);
    }

    // ==================== MemoryRepository ====================

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: i64,
        name: String,
        age: i64,
        status: String,
    }

    impl User {
        fn new(id: i64, name: &str, age: i64, status: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
                age,
                status: status.to_string(),
            }
        }
    }

    impl Entity for User {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }
    }

    impl FieldLookup for User {
        fn field(&self, name: &str) -> Option<Scalar> {
            match name {
                "id" => Some(Scalar::Int(self.id)),
                "name" => Some(Scalar::from(self.name.clone())),
                "age" => Some(Scalar::Int(self.age)),
                "status" => Some(Scalar::from(self.status.clone())),
                _ => None,
            }
        }
    }

    fn seeded() -> MemoryRepository<User> {
        MemoryRepository::with_entities(vec![
            User::new(1, "ana", 34, "active"),
            User::new(2, "bruno", 17, "active"),
            User::new(3, "carla", 25, "inactive"),
        ])
    }

    #[tokio::test]
    async fn test_save_reports_new_vs_replaced() {
        let repository = MemoryRepository::new();
        assert!(repository.save(User::new(1, "ana", 34, "active")).await.unwrap());
        assert_eq!(repository.len(), 1);

        // Same identity, new state.
        assert!(!repository.save(User::new(1, "ana", 35, "active")).await.unwrap());
        assert_eq!(repository.len(), 1);
        let ana = repository.find_by_id(&1).await.unwrap().unwrap();
        assert_eq!(ana.age, 35);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repository = seeded();
        assert_eq!(
            repository.find_by_id(&2).await.unwrap(),
            Some(User::new(2, "bruno", 17, "active")),
        );
        assert_eq!(repository.find_by_id(&9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repository = seeded();
        let carla = User::new(3, "carla", 25, "inactive");
        assert!(repository.delete(&carla).await.unwrap());
        assert_eq!(repository.len(), 2);
        // Second delete finds nothing.
        assert!(!repository.delete(&carla).await.unwrap());
    }

    #[tokio::test]
    async fn test_matching_applies_criteria() {
        let repository = seeded();
        let criteria = QueryCriteria::new()
            .filter(Filter::new("status", FilterOperator::Equal, "active"))
            .order_by(Order::desc("age"));

        let matched = repository.matching(&criteria).await.unwrap();
        let names: Vec<&str> = matched.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, ["ana", "bruno"]);
    }

    #[tokio::test]
    async fn test_count_sees_the_window() {
        let repository = seeded();
        assert_eq!(repository.count(&AnyCriteria::new()).await.unwrap(), 3);

        let capped = QueryCriteria::new().with_limit(2);
        assert_eq!(repository.count(&capped).await.unwrap(), 2);
    }
}
