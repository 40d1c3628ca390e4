//! Store catalog and filter engine for the foodmap finder.
//!
//! [`Catalog::load`] pulls the store list and tag vocabulary from a
//! [`StoreSource`], [`Catalog::attach_markers`] plots one marker per store on
//! a [`MapSurface`], and [`StoreMap::apply_filter`] keeps the attached
//! markers in sync with a [`foodmap_core::FilterRule`]. [`AppState`] ties
//! these to the filter controls.

pub mod catalog;
pub mod detail;
pub mod error;
pub mod list;
pub mod map;
pub mod source;
pub mod state;
pub mod store_map;

pub use catalog::Catalog;
pub use detail::{DetailRequests, DetailTicket};
pub use error::EngineError;
pub use list::{StoreListView, StoreRow};
pub use map::{HeadlessMap, MapSurface, MarkerId, PopupContent};
pub use source::{StaticSource, StaticSourceError, StoreSource};
pub use state::{AppState, LoadState};
pub use store_map::{FilterOutcome, StoreMap};
