//! The store data source capability.

use std::collections::HashMap;
use std::future::Future;

use foodmap_core::{CatalogFile, StoreDetail, StoreId, StoreRecord};
use thiserror::Error;

/// Remote (or stand-in) catalog the finder reads from.
///
/// The store list and the tag vocabulary are independent requests; callers
/// may issue them concurrently and must not assume either finishes first.
pub trait StoreSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `GET /api/stores`
    fn fetch_stores(&self) -> impl Future<Output = Result<Vec<StoreRecord>, Self::Error>> + Send;

    /// `GET /api/types`
    fn fetch_tags(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    /// `GET /api/stores/{id}`
    fn fetch_store_details(
        &self,
        id: &StoreId,
    ) -> impl Future<Output = Result<StoreDetail, Self::Error>> + Send;
}

#[derive(Debug, Error)]
pub enum StaticSourceError {
    #[error("no details recorded for store {0}")]
    NoDetails(StoreId),
}

/// In-memory source backed by a [`CatalogFile`].
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    stores: Vec<StoreRecord>,
    tags: Vec<String>,
    details: HashMap<StoreId, StoreDetail>,
}

impl StaticSource {
    #[must_use]
    pub fn new(stores: Vec<StoreRecord>, tags: Vec<String>) -> Self {
        Self {
            stores,
            tags,
            details: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, id: StoreId, detail: StoreDetail) -> Self {
        self.details.insert(id, detail);
        self
    }
}

impl From<CatalogFile> for StaticSource {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.stores, file.types)
    }
}

impl StoreSource for StaticSource {
    type Error = StaticSourceError;

    async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, Self::Error> {
        Ok(self.stores.clone())
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.tags.clone())
    }

    async fn fetch_store_details(&self, id: &StoreId) -> Result<StoreDetail, Self::Error> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| StaticSourceError::NoDetails(id.clone()))
    }
}
