//! Summary rows for the store list panel.

use foodmap_core::{Store, StoreId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRow {
    pub id: StoreId,
    pub name: String,
    pub price: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl StoreRow {
    #[must_use]
    pub fn for_store(store: &Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            price: store.price_level.describe().to_string(),
            tags: store.tags.clone(),
            score: store.score,
        }
    }
}

impl std::fmt::Display for StoreRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} | {}", self.id, self.name, self.price)?;
        if !self.tags.is_empty() {
            write!(f, " | {}", self.tags.join(", "))?;
        }
        if let Some(score) = self.score {
            write!(f, " | score {score:.1}")?;
        }
        Ok(())
    }
}

/// A list-style panel that mirrors the visible stores.
pub trait StoreListView {
    fn clear(&mut self);
    fn append(&mut self, row: StoreRow);
}

impl StoreListView for Vec<StoreRow> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn append(&mut self, row: StoreRow) {
        self.push(row);
    }
}
