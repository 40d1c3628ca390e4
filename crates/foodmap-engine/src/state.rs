//! Session state: the plotted catalog, the filter controls, and outstanding
//! detail requests. Created once at start-up and mutated only through the
//! handlers below.

use foodmap_core::{
    FilterControls, PriceLevelSelector, Store, StoreDetail, StoreId, TagSelection,
    UnsetPricePolicy,
};

use crate::catalog::Catalog;
use crate::detail::{DetailRequests, DetailTicket};
use crate::error::EngineError;
use crate::list::StoreListView;
use crate::map::{MapSurface, MarkerId};
use crate::source::StoreSource;
use crate::store_map::{FilterOutcome, StoreMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    /// Catalog initialisation failed; the map is empty and controls are off.
    Failed(String),
}

#[derive(Debug)]
pub struct AppState<M> {
    controls: FilterControls,
    map: StoreMap<M>,
    details: DetailRequests,
    load_state: LoadState,
}

impl<M: MapSurface> AppState<M> {
    /// Loads the catalog, plots its markers and builds the tag checkboxes.
    ///
    /// A failed load is not returned as an error: the state comes back with
    /// an empty map, disabled controls and [`LoadState::Failed`].
    pub async fn initialize<S: StoreSource>(
        source: &S,
        surface: M,
        price: PriceLevelSelector,
        unset_price: UnsetPricePolicy,
    ) -> Self {
        match Catalog::load(source).await {
            Ok(catalog) => {
                let tags = TagSelection::from_vocabulary(catalog.tags().iter().cloned());
                Self {
                    controls: FilterControls::new(price, tags, unset_price),
                    map: catalog.attach_markers(surface),
                    details: DetailRequests::new(),
                    load_state: LoadState::Ready,
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load stores");
                let mut controls = FilterControls::new(price, TagSelection::default(), unset_price);
                controls.disable();
                Self {
                    controls,
                    map: Catalog::default().attach_markers(surface),
                    details: DetailRequests::new(),
                    load_state: LoadState::Failed(err.to_string()),
                }
            }
        }
    }

    /// Re-reads the controls and runs a filter pass.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ControlsDisabled`] if the catalog failed to load.
    pub fn search(&mut self, list: Option<&mut dyn StoreListView>) -> Result<FilterOutcome, EngineError> {
        if !self.controls.is_enabled() {
            return Err(EngineError::ControlsDisabled);
        }
        let rule = self.controls.read_rule();
        Ok(self.map.apply_filter(&rule, list))
    }

    /// Keyword input handler; searches on every change.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ControlsDisabled`] if the catalog failed to load.
    pub fn set_keyword(
        &mut self,
        keyword: impl Into<String>,
        list: Option<&mut dyn StoreListView>,
    ) -> Result<FilterOutcome, EngineError> {
        self.controls.set_keyword(keyword)?;
        self.search(list)
    }

    /// Price button handler.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ControlsDisabled`] or [`EngineError::Controls`]
    /// for an out-of-range button.
    pub fn click_price(
        &mut self,
        index: usize,
        list: Option<&mut dyn StoreListView>,
    ) -> Result<FilterOutcome, EngineError> {
        self.controls.click_price(index)?;
        self.search(list)
    }

    /// Selects the price ceiling by rank instead of button index.
    ///
    /// # Errors
    ///
    /// Same as [`AppState::click_price`].
    pub fn select_price(
        &mut self,
        rank: u32,
        list: Option<&mut dyn StoreListView>,
    ) -> Result<FilterOutcome, EngineError> {
        self.controls.select_price_rank(rank)?;
        self.search(list)
    }

    /// Tag checkbox handler.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ControlsDisabled`] or [`EngineError::Controls`]
    /// for a tag outside the vocabulary.
    pub fn toggle_tag(
        &mut self,
        name: &str,
        list: Option<&mut dyn StoreListView>,
    ) -> Result<FilterOutcome, EngineError> {
        self.controls.toggle_tag(name)?;
        self.search(list)
    }

    /// "Clear filters" handler.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ControlsDisabled`] if the catalog failed to load.
    pub fn clear_filters(
        &mut self,
        list: Option<&mut dyn StoreListView>,
    ) -> Result<FilterOutcome, EngineError> {
        self.controls.clear_all()?;
        self.search(list)
    }

    /// Marker click handler: issues a detail ticket for the marker's store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownMarker`] if the marker is not ours.
    pub fn on_marker_click(&mut self, marker: MarkerId) -> Result<DetailTicket, EngineError> {
        let id = self
            .map
            .store_for_marker(marker)
            .map(|store| store.id.clone())
            .ok_or(EngineError::UnknownMarker(marker))?;
        self.begin_detail(&id)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::UnknownStore`] if `id` is not in the catalog.
    pub fn begin_detail(&mut self, id: &StoreId) -> Result<DetailTicket, EngineError> {
        if self.map.catalog().get(id).is_none() {
            return Err(EngineError::UnknownStore(id.clone()));
        }
        Ok(self.details.begin(id))
    }

    /// Merges a detail response if `ticket` is still the latest for its
    /// store. Returns `false` for a superseded or cancelled response.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownStore`] if the store is not in the catalog.
    pub fn complete_detail(
        &mut self,
        ticket: &DetailTicket,
        detail: StoreDetail,
    ) -> Result<bool, EngineError> {
        if !self.details.finish(ticket) {
            tracing::debug!(
                store_id = %ticket.store_id(),
                generation = ticket.generation(),
                "dropping stale store details"
            );
            return Ok(false);
        }
        self.map.merge_detail(ticket.store_id(), detail)?;
        Ok(true)
    }

    /// Abandons the request behind `ticket` after a failed fetch.
    pub fn fail_detail(&mut self, ticket: &DetailTicket) {
        self.details.finish(ticket);
    }

    pub fn cancel_detail(&mut self, id: &StoreId) -> bool {
        self.details.cancel(id)
    }

    /// Fetches and merges full details for one store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownStore`] or [`EngineError::Source`].
    pub async fn open_store<S: StoreSource>(
        &mut self,
        source: &S,
        id: &StoreId,
    ) -> Result<bool, EngineError> {
        let ticket = self.begin_detail(id)?;
        match source.fetch_store_details(id).await {
            Ok(detail) => self.complete_detail(&ticket, detail),
            Err(err) => {
                tracing::warn!(store_id = %id, error = %err, "store detail fetch failed");
                self.fail_detail(&ticket);
                Err(EngineError::from_source(err))
            }
        }
    }

    #[must_use]
    pub fn store(&self, id: &StoreId) -> Option<&Store> {
        self.map.catalog().get(id)
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    #[must_use]
    pub fn map(&self) -> &StoreMap<M> {
        &self.map
    }
}
