//! The map surface capability and a headless implementation of it.

use foodmap_core::{Location, Store, StoreId};

/// Opaque handle to a marker owned by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Text shown in a marker's popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub name: String,
    pub price: String,
    pub tags: String,
}

impl PopupContent {
    #[must_use]
    pub fn for_store(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            price: format!("{} ({})", store.price_level, store.price_level.describe()),
            tags: store.tags.join(" ,"),
        }
    }
}

impl std::fmt::Display for PopupContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\nprice: {}\ntags: {}", self.name, self.price, self.tags)
    }
}

/// Whatever draws markers: a mapping library binding, or [`HeadlessMap`].
///
/// A marker created here is owned by the surface for its whole life; the
/// engine only attaches and detaches it. Clicks are routed back by the store
/// id passed to [`MapSurface::create_marker`].
pub trait MapSurface {
    /// Creates a marker at `at` with `popup` bound to it. New markers start
    /// detached.
    fn create_marker(&mut self, store: &StoreId, at: Location, popup: PopupContent) -> MarkerId;

    fn attach(&mut self, marker: MarkerId);

    fn detach(&mut self, marker: MarkerId);

    fn update_popup(&mut self, marker: MarkerId, popup: PopupContent);

    /// Brings the map region into the viewport.
    fn scroll_into_view(&mut self);
}

#[derive(Debug, Clone)]
struct HeadlessMarker {
    store: StoreId,
    location: Location,
    popup: PopupContent,
    attached: bool,
}

/// In-memory [`MapSurface`] that records marker state and scroll requests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    markers: Vec<HeadlessMarker>,
    scroll_requests: usize,
}

impl HeadlessMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a click and returns the store the marker belongs to.
    #[must_use]
    pub fn click(&self, marker: MarkerId) -> Option<&StoreId> {
        self.marker(marker).map(|m| &m.store)
    }

    #[must_use]
    pub fn is_attached(&self, marker: MarkerId) -> bool {
        self.marker(marker).is_some_and(|m| m.attached)
    }

    #[must_use]
    pub fn attached_markers(&self) -> Vec<MarkerId> {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.attached)
            .map(|(i, _)| marker_id(i))
            .collect()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn popup(&self, marker: MarkerId) -> Option<&PopupContent> {
        self.marker(marker).map(|m| &m.popup)
    }

    #[must_use]
    pub fn location(&self, marker: MarkerId) -> Option<Location> {
        self.marker(marker).map(|m| m.location)
    }

    #[must_use]
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    fn marker(&self, marker: MarkerId) -> Option<&HeadlessMarker> {
        usize::try_from(marker.get())
            .ok()
            .and_then(|i| self.markers.get(i))
    }

    fn marker_mut(&mut self, marker: MarkerId) -> Option<&mut HeadlessMarker> {
        usize::try_from(marker.get())
            .ok()
            .and_then(|i| self.markers.get_mut(i))
    }
}

fn marker_id(index: usize) -> MarkerId {
    MarkerId::new(u64::try_from(index).unwrap_or(u64::MAX))
}

impl MapSurface for HeadlessMap {
    fn create_marker(&mut self, store: &StoreId, at: Location, popup: PopupContent) -> MarkerId {
        let id = marker_id(self.markers.len());
        self.markers.push(HeadlessMarker {
            store: store.clone(),
            location: at,
            popup,
            attached: false,
        });
        id
    }

    fn attach(&mut self, marker: MarkerId) {
        if let Some(m) = self.marker_mut(marker) {
            m.attached = true;
        }
    }

    fn detach(&mut self, marker: MarkerId) {
        if let Some(m) = self.marker_mut(marker) {
            m.attached = false;
        }
    }

    fn update_popup(&mut self, marker: MarkerId, popup: PopupContent) {
        if let Some(m) = self.marker_mut(marker) {
            m.popup = popup;
        }
    }

    fn scroll_into_view(&mut self) {
        self.scroll_requests += 1;
    }
}
