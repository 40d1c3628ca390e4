//! Filter engine: keeps the markers on the map in step with a filter rule.

use foodmap_core::{FilterRule, Store, StoreDetail, StoreId};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::list::{StoreListView, StoreRow};
use crate::map::{MapSurface, MarkerId, PopupContent};

/// Result of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    /// Ids of the stores left on the map, in catalog order.
    pub matched: Vec<StoreId>,
    /// Markers removed at the start of the pass.
    pub detached: usize,
}

/// A catalog whose stores each own exactly one marker on `M`.
///
/// Markers are created once by [`Catalog::attach_markers`] and are only
/// attached or detached from then on.
#[derive(Debug)]
pub struct StoreMap<M> {
    catalog: Catalog,
    surface: M,
    markers: Vec<MarkerId>,
    attached: Vec<bool>,
}

impl<M: MapSurface> StoreMap<M> {
    /// `markers[i]` belongs to the i-th catalog store and is already attached.
    pub(crate) fn new(catalog: Catalog, surface: M, markers: Vec<MarkerId>) -> Self {
        debug_assert_eq!(catalog.len(), markers.len());
        let attached = vec![true; markers.len()];
        Self {
            catalog,
            surface,
            markers,
            attached,
        }
    }

    /// Runs one filter pass.
    ///
    /// Every attached marker is detached first, then the markers of matching
    /// stores are attached again in catalog order. When `list` is given it is
    /// cleared and receives one row per match. Ends by scrolling the map into
    /// view.
    pub fn apply_filter(
        &mut self,
        rule: &FilterRule,
        mut list: Option<&mut dyn StoreListView>,
    ) -> FilterOutcome {
        let mut detached = 0;
        for (marker, attached) in self.markers.iter().zip(self.attached.iter_mut()) {
            if *attached {
                self.surface.detach(*marker);
                *attached = false;
                detached += 1;
            }
        }

        if let Some(view) = list.as_deref_mut() {
            view.clear();
        }

        let mut matched = Vec::new();
        for (i, store) in self.catalog.stores().iter().enumerate() {
            if !rule.matches(store) {
                tracing::debug!(store_id = %store.id, "store filtered out");
                continue;
            }
            self.surface.attach(self.markers[i]);
            self.attached[i] = true;
            if let Some(view) = list.as_deref_mut() {
                view.append(StoreRow::for_store(store));
            }
            matched.push(store.id.clone());
        }

        self.surface.scroll_into_view();

        tracing::info!(
            matched = matched.len(),
            total = self.catalog.len(),
            detached,
            keyword = %rule.keyword,
            "filter applied"
        );

        FilterOutcome { matched, detached }
    }

    /// Fills `list` with every store, in catalog order.
    pub fn list_all(&self, list: &mut dyn StoreListView) {
        list.clear();
        for store in self.catalog.stores() {
            list.append(StoreRow::for_store(store));
        }
    }

    /// Merges a detail response into the store and refreshes its popup.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownStore`] if `id` is not in the catalog.
    pub fn merge_detail(&mut self, id: &StoreId, detail: StoreDetail) -> Result<&Store, EngineError> {
        let position = self
            .catalog
            .position(id)
            .ok_or_else(|| EngineError::UnknownStore(id.clone()))?;
        let store = self
            .catalog
            .store_mut(position)
            .ok_or_else(|| EngineError::UnknownStore(id.clone()))?;
        store.merge_detail(detail);
        self.surface
            .update_popup(self.markers[position], PopupContent::for_store(store));
        tracing::debug!(store_id = %id, "merged store details");
        Ok(store)
    }

    #[must_use]
    pub fn marker_for(&self, id: &StoreId) -> Option<MarkerId> {
        self.catalog.position(id).map(|i| self.markers[i])
    }

    #[must_use]
    pub fn store_for_marker(&self, marker: MarkerId) -> Option<&Store> {
        self.markers
            .iter()
            .position(|m| *m == marker)
            .map(|i| &self.catalog.stores()[i])
    }

    /// Ids of stores whose marker is currently attached, in catalog order.
    #[must_use]
    pub fn attached_ids(&self) -> Vec<&StoreId> {
        self.catalog
            .stores()
            .iter()
            .zip(&self.attached)
            .filter(|(_, attached)| **attached)
            .map(|(store, _)| &store.id)
            .collect()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn surface(&self) -> &M {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::map::HeadlessMap;
    use foodmap_core::{Location, PriceLevel, PriceThreshold, StoreRecord};

    fn record(id: &str, name: &str, price: &str, tags: &[&str]) -> StoreRecord {
        StoreRecord {
            id: Some(StoreId::new(id)),
            name: name.to_string(),
            location: Location { lat: 25.0, lng: 121.5 },
            price_level: PriceLevel::Symbols(price.to_string()),
            tags: tags.iter().map(ToString::to_string).collect(),
            scores: None,
        }
    }

    fn rule(keyword: &str, price: PriceThreshold, tags: &[&str]) -> FilterRule {
        FilterRule {
            keyword: keyword.to_string(),
            max_price_level: price,
            required_tags: tags.iter().map(ToString::to_string).collect::<BTreeSet<_>>(),
        }
    }

    fn plotted() -> StoreMap<HeadlessMap> {
        Catalog::from_records(
            vec![
                record("1", "A Cafe", "$", &["coffee"]),
                record("2", "B Diner", "$$$", &["breakfast"]),
                record("3", "C Cafe Bar", "$$", &["coffee", "bar"]),
            ],
            vec![],
        )
        .unwrap()
        .attach_markers(HeadlessMap::new())
    }

    fn ids(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.matched.iter().map(StoreId::as_str).collect()
    }

    #[test]
    fn price_threshold_keeps_only_cheap_store() {
        let mut map = plotted();
        let outcome = map.apply_filter(&rule("", PriceThreshold::AtMost(1), &[]), None);
        assert_eq!(ids(&outcome), vec!["1"]);
        assert_eq!(outcome.detached, 3);
        assert_eq!(map.surface().attached_markers().len(), 1);
    }

    #[test]
    fn pass_through_reattaches_everything() {
        let mut map = plotted();
        map.apply_filter(&rule("Diner", PriceThreshold::Unbounded, &[]), None);
        let outcome = map.apply_filter(&FilterRule::pass_through(), None);
        assert_eq!(ids(&outcome), vec!["1", "2", "3"]);
        assert_eq!(outcome.detached, 1);
        assert_eq!(map.surface().attached_markers().len(), 3);
    }

    #[test]
    fn required_tags_must_all_match() {
        let mut map = plotted();
        let outcome = map.apply_filter(&rule("", PriceThreshold::Unbounded, &["coffee", "bar"]), None);
        assert_eq!(ids(&outcome), vec!["3"]);
    }

    #[test]
    fn same_rule_twice_gives_same_attached_set() {
        let mut map = plotted();
        let r = rule("Cafe", PriceThreshold::AtMost(2), &[]);
        map.apply_filter(&r, None);
        let first = map.surface().attached_markers();
        map.apply_filter(&r, None);
        assert_eq!(map.surface().attached_markers(), first);
        assert_eq!(
            map.attached_ids().into_iter().map(StoreId::as_str).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }

    #[test]
    fn markers_are_never_recreated() {
        let mut map = plotted();
        for keyword in ["A", "", "zzz", "Cafe", ""] {
            map.apply_filter(&rule(keyword, PriceThreshold::Unbounded, &[]), None);
        }
        assert_eq!(map.surface().marker_count(), 3);
        assert_eq!(map.marker_count(), map.catalog().len());
    }

    #[test]
    fn every_pass_scrolls_to_map() {
        let mut map = plotted();
        map.apply_filter(&FilterRule::pass_through(), None);
        map.apply_filter(&FilterRule::pass_through(), None);
        assert_eq!(map.surface().scroll_requests(), 2);
    }

    #[test]
    fn list_view_gets_rows_in_catalog_order() {
        let mut map = plotted();
        let mut rows: Vec<StoreRow> = Vec::new();
        map.list_all(&mut rows);
        assert_eq!(rows.len(), 3);

        map.apply_filter(&rule("Cafe", PriceThreshold::Unbounded, &[]), Some(&mut rows));
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A Cafe", "C Cafe Bar"]);
    }

    #[test]
    fn reject_all_leaves_map_empty() {
        let mut map = plotted();
        let outcome = map.apply_filter(&rule("", PriceThreshold::RejectAll, &[]), None);
        assert!(outcome.matched.is_empty());
        assert!(map.surface().attached_markers().is_empty());
    }

    #[test]
    fn merge_detail_updates_store_and_popup() {
        let mut map = plotted();
        let id = StoreId::new("2");
        let detail = StoreDetail {
            name: Some("B Diner 24h".to_string()),
            ..StoreDetail::default()
        };
        let store = map.merge_detail(&id, detail).unwrap();
        assert!(store.extended);

        let marker = map.marker_for(&id).unwrap();
        assert_eq!(map.surface().popup(marker).unwrap().name, "B Diner 24h");
        assert_eq!(map.store_for_marker(marker).unwrap().name, "B Diner 24h");
        assert_eq!(map.surface().marker_count(), 3);
    }

    #[test]
    fn merge_detail_for_unknown_store_fails() {
        let mut map = plotted();
        let err = map
            .merge_detail(&StoreId::new("99"), StoreDetail::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownStore(_)));
    }
}
