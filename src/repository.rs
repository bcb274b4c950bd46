//! Repository contracts over criteria.
//!
//! A [`Repository`] hides the storage backend behind a handful of
//! operations, with [`Criteria`] as the only query language. Callers
//! describe what they want; the repository's converter decides how the
//! backend expresses it.

use async_trait::async_trait;

use crate::criteria::Criteria;

/// A persistable object with a stable identity.
pub trait Entity: Send + Sync {
    /// Identity type. Typically `Copy` or a small owned value.
    type Id: PartialEq + Send + Sync;

    /// The identity of this entity.
    fn id(&self) -> Self::Id;
}

/// Storage access for one entity type, queried through criteria.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Entity type this repository stores.
    type Entity: Entity;
    /// Backend error type.
    type Error;

    /// Find one entity by its identity.
    async fn find_by_id(
        &self,
        id: &<Self::Entity as Entity>::Id,
    ) -> Result<Option<Self::Entity>, Self::Error>;

    /// Insert or replace an entity.
    ///
    /// Returns `true` when the entity was new and `false` when an
    /// existing entity with the same identity was replaced.
    async fn save(&self, entity: Self::Entity) -> Result<bool, Self::Error>;

    /// Delete an entity by its identity.
    ///
    /// Returns `true` when something was removed. Deleting an entity
    /// that was never stored is not an error.
    async fn delete(&self, entity: &Self::Entity) -> Result<bool, Self::Error>;

    /// All entities matching the criteria, in criteria order.
    async fn matching(&self, criteria: &dyn Criteria) -> Result<Vec<Self::Entity>, Self::Error>;

    /// Count entities matching the criteria.
    ///
    /// The count sees the whole criteria, pagination included, so it
    /// always equals `matching(criteria).len()`. Backends with a native
    /// count should override this; the default materializes the
    /// matches.
    async fn count(&self, criteria: &dyn Criteria) -> Result<u64, Self::Error> {
        Ok(self.matching(criteria).await?.len() as u64)
    }
}
