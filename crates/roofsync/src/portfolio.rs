//! Local CRUD over the property collection.

use std::sync::Arc;

use roofsync_core::{NewProperty, PortfolioSummary, Property, PropertyCollection, PropertyId};
use roofsync_store::{KeyValueStore, LocalStore};

use crate::error::Result;

/// The local property collection and the edits a user can make to it.
///
/// Every edit loads the current collection, applies one change, and saves
/// before returning. A rejected edit never touches the store, and neither
/// does an edit whose collection could not be read.
#[derive(Debug)]
pub struct Portfolio<K> {
    local: Arc<LocalStore<K>>,
}

impl<K> Clone for Portfolio<K> {
    fn clone(&self) -> Self {
        Self {
            local: Arc::clone(&self.local),
        }
    }
}

impl<K: KeyValueStore> Portfolio<K> {
    /// Create a portfolio over a local store.
    pub fn new(local: Arc<LocalStore<K>>) -> Self {
        Self { local }
    }

    /// The local store.
    pub fn local(&self) -> &Arc<LocalStore<K>> {
        &self.local
    }

    /// Validate a survey, derive its capacity figures, and store it as the
    /// newest property.
    ///
    /// Fails with a validation error when the roof area is out of bounds or
    /// a text field is blank.
    pub fn add(&self, input: NewProperty) -> Result<Property> {
        let property = Property::create(input)?;
        let mut collection = self.local.try_load()?;
        collection.insert_front(property.clone())?;
        self.local.save(&collection)?;

        tracing::info!(
            id = %property.id(),
            roof_area = property.roof_area(),
            capacity_kw = property.capacity_kw(),
            "property added"
        );
        Ok(property)
    }

    /// Delete a property by id. Returns the removed record, or `None` if no
    /// property had that id (the store is not rewritten in that case).
    pub fn remove(&self, id: &PropertyId) -> Result<Option<Property>> {
        let mut collection = self.local.try_load()?;
        let Some(removed) = collection.remove(id) else {
            tracing::debug!(id = %id, "no property to remove");
            return Ok(None);
        };
        self.local.save(&collection)?;
        tracing::info!(id = %id, "property removed");
        Ok(Some(removed))
    }

    /// All properties, newest first.
    pub fn list(&self) -> PropertyCollection {
        self.local.load()
    }

    /// One property by id.
    pub fn get(&self, id: &PropertyId) -> Option<Property> {
        self.local.load().get(id).cloned()
    }

    /// Count and total capacity of the portfolio.
    pub fn summary(&self) -> PortfolioSummary {
        self.local.load().summary()
    }
}
