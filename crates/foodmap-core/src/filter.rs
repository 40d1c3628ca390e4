//! The keyword / price / tag predicate.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::store::Store;

/// What to do with the price threshold when no price button is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsetPricePolicy {
    /// No selection means no price filtering.
    #[default]
    Unbounded,
    /// No selection hides every store, as the legacy page did when its
    /// threshold came out as `NaN`.
    HideAll,
}

impl std::fmt::Display for UnsetPricePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsetPricePolicy::Unbounded => write!(f, "unbounded"),
            UnsetPricePolicy::HideAll => write!(f, "hide-all"),
        }
    }
}

/// Resolved price bound for one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "rank")]
pub enum PriceThreshold {
    AtMost(u32),
    Unbounded,
    RejectAll,
}

impl PriceThreshold {
    /// Resolves a selector rank under `policy`.
    #[must_use]
    pub fn resolve(selected: Option<u32>, policy: UnsetPricePolicy) -> Self {
        match (selected, policy) {
            (Some(rank), _) => Self::AtMost(rank),
            (None, UnsetPricePolicy::Unbounded) => Self::Unbounded,
            (None, UnsetPricePolicy::HideAll) => Self::RejectAll,
        }
    }

    #[must_use]
    pub fn admits(self, rank: u32) -> bool {
        match self {
            Self::AtMost(max) => rank <= max,
            Self::Unbounded => true,
            Self::RejectAll => false,
        }
    }
}

/// Snapshot of the filter controls, read right before a filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRule {
    /// Case-sensitive substring of the store name; empty matches everything.
    pub keyword: String,
    pub max_price_level: PriceThreshold,
    /// Every tag here must be present on the store.
    pub required_tags: BTreeSet<String>,
}

impl FilterRule {
    /// A rule every store passes.
    #[must_use]
    pub fn pass_through() -> Self {
        Self {
            keyword: String::new(),
            max_price_level: PriceThreshold::Unbounded,
            required_tags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn matches(&self, store: &Store) -> bool {
        store.name.contains(self.keyword.as_str())
            && self.max_price_level.admits(store.price_rank())
            && self.required_tags.iter().all(|tag| store.has_tag(tag))
    }
}
