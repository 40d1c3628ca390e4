//! The authoritative in-memory store list for one session.

use std::collections::HashMap;

use foodmap_core::{Store, StoreId, StoreRecord};

use crate::error::EngineError;
use crate::map::{MapSurface, PopupContent};
use crate::source::StoreSource;
use crate::store_map::StoreMap;

/// Stores keyed by id, kept in the order the source returned them.
///
/// Membership is fixed once built; only derived fields and merged details
/// change afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stores: Vec<Store>,
    index: HashMap<StoreId, usize>,
    tags: Vec<String>,
}

impl Catalog {
    /// Fetches the store list and tag vocabulary and derives per-store fields.
    ///
    /// Both requests are in flight together; either may finish first.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Source`] if either request fails.
    /// - [`EngineError::DuplicateStoreId`] if two records share an id.
    pub async fn load<S: StoreSource>(source: &S) -> Result<Self, EngineError> {
        let (records, tags) =
            futures::future::try_join(source.fetch_stores(), source.fetch_tags())
                .await
                .map_err(EngineError::from_source)?;

        let mut catalog = Self::from_records(records, tags)?;
        catalog.compute_derived();

        tracing::info!(
            stores = catalog.len(),
            tags = catalog.tags.len(),
            "store catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog without deriving fields.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateStoreId`] if two records share an id.
    pub fn from_records(records: Vec<StoreRecord>, tags: Vec<String>) -> Result<Self, EngineError> {
        let mut stores = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let store = Store::from_record(record, position);
            if index.insert(store.id.clone(), position).is_some() {
                return Err(EngineError::DuplicateStoreId(store.id));
            }
            stores.push(store);
        }

        Ok(Self {
            stores,
            index,
            tags,
        })
    }

    pub fn compute_derived(&mut self) {
        for store in &mut self.stores {
            store.compute_derived();
        }
        let scored = self.stores.iter().filter(|s| s.score.is_some()).count();
        tracing::debug!(scored, total = self.stores.len(), "derived store scores");
    }

    /// Creates one marker per store, in catalog order, and attaches all of them.
    #[must_use]
    pub fn attach_markers<M: MapSurface>(self, mut surface: M) -> StoreMap<M> {
        let markers = self
            .stores
            .iter()
            .map(|store| {
                let marker =
                    surface.create_marker(&store.id, store.location, PopupContent::for_store(store));
                surface.attach(marker);
                marker
            })
            .collect();
        StoreMap::new(self, surface, markers)
    }

    #[must_use]
    pub fn get(&self, id: &StoreId) -> Option<&Store> {
        self.position(id).map(|i| &self.stores[i])
    }

    #[must_use]
    pub fn position(&self, id: &StoreId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Tag vocabulary as served by the source.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub(crate) fn store_mut(&mut self, position: usize) -> Option<&mut Store> {
        self.stores.get_mut(position)
    }
}
