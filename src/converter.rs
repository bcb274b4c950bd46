//! Translating criteria into storage-native queries.

use crate::criteria::Criteria;

/// Translates criteria into mutations on a storage-native query handle.
///
/// `Q` is whatever the backend builds queries with: a SQL statement
/// builder, a document filter, an in-memory record set. Implementations
/// own the pairing rules between operators and value shapes, since what
/// is expressible differs per backend.
///
/// # Contract
///
/// Converters are where criteria semantics become real. Every
/// implementation must:
///
/// - skip filters where [`Filter::is_match_all`] is true instead of
///   comparing a literal `*` against stored fields
/// - apply the remaining filters in insertion order, combined with AND
/// - apply no ordering when [`Order::is_none`] is true
/// - prefer the keyset `pointer` over `offset` when both are set
/// - decide, per operator, what a mismatched value shape means: either
///   reject it through [`Self::Error`] or define it as matching nothing
///
/// [`Filter::is_match_all`]: crate::Filter::is_match_all
/// [`Order::is_none`]: crate::Order::is_none
pub trait CriteriaConverter<Q> {
    /// Error produced when criteria cannot be expressed against `Q`.
    type Error;

    /// Apply the criteria's filters, ordering, and pagination to the query.
    fn apply(&self, query: &mut Q, criteria: &dyn Criteria) -> Result<(), Self::Error>;
}
