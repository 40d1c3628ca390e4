//! Store records as served by the catalog endpoints, plus the fields the
//! finder derives from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the store data source.
///
/// The catalog serves both numeric and string ids; both are normalised to
/// their string form so lookups do not depend on the wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StoreId(String);

impl StoreId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StoreId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// Geographic coordinate, serialised as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl From<[f64; 2]> for Location {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Location> for [f64; 2] {
    fn from(location: Location) -> Self {
        [location.lat, location.lng]
    }
}

/// Price indicator as delivered by the catalog.
///
/// The simple catalog sends a symbol string such as `"$$"`; the richer one
/// sends a list of per-category scores. Either way the rank is the length
/// of the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceLevel {
    Symbols(String),
    Scores(Vec<f64>),
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::Symbols(String::new())
    }
}

impl PriceLevel {
    /// Ordinal rank used for threshold comparison: a longer representation
    /// ranks higher. Symbol strings are measured in characters, not bytes.
    ///
    /// The detail endpoint names its level instead (`cheap`, `medium`,
    /// `expensive`, or the stored runes `c`, `m`, `e`); those map to 1, 2, 3.
    #[must_use]
    pub fn rank(&self) -> u32 {
        let len = match self {
            Self::Symbols(symbols) => match symbols.as_str() {
                "cheap" | "c" => 1,
                "medium" | "m" => 2,
                "expensive" | "e" => 3,
                other => other.chars().count(),
            },
            Self::Scores(scores) => scores.len(),
        };
        u32::try_from(len).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self.rank() {
            0 => "unknown",
            1 => "cheap",
            2 => "medium",
            _ => "expensive",
        }
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbols(symbols) => f.write_str(symbols),
            Self::Scores(scores) => {
                let parts: Vec<String> = scores.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// One element of the `/api/stores` response, before the catalog assigns
/// derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(default)]
    pub id: Option<StoreId>,
    pub name: String,
    pub location: Location,
    #[serde(default)]
    pub price_level: PriceLevel,
    #[serde(rename = "type", alias = "categories", default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub scores: Option<Vec<f64>>,
}

/// A restaurant in the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub location: Location,
    pub price_level: PriceLevel,
    #[serde(rename = "type")]
    pub tags: Vec<String>,
    pub scores: Vec<f64>,
    /// Mean of `scores`; `None` until derived or when `scores` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Set once a full detail record has been merged in.
    pub extended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StoreDetail>,
}

impl Store {
    /// Builds a store from its wire record. Records without an id are keyed
    /// by their position in the response.
    #[must_use]
    pub fn from_record(record: StoreRecord, position: usize) -> Self {
        Self {
            id: record
                .id
                .unwrap_or_else(|| StoreId::new(position.to_string())),
            name: record.name,
            location: record.location,
            price_level: record.price_level,
            tags: dedupe_tags(record.tags),
            scores: record.scores.unwrap_or_default(),
            score: None,
            extended: false,
            details: None,
        }
    }

    #[must_use]
    pub fn price_rank(&self) -> u32 {
        self.price_level.rank()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn compute_derived(&mut self) {
        self.score = average_score(&self.scores);
    }

    /// Folds a detail response into this record.
    ///
    /// Name, price and tags are overwritten when the detail carries them;
    /// the location is left alone because the store's marker is never moved.
    pub fn merge_detail(&mut self, mut detail: StoreDetail) {
        if let Some(name) = detail.name.take().filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(price_level) = detail.price_level.take() {
            self.price_level = price_level;
        }
        if let Some(tags) = detail.tags.take() {
            self.tags = dedupe_tags(tags);
        }
        if let Some(scores) = detail.scores.take() {
            self.scores = scores;
        }
        self.compute_derived();
        self.extended = true;
        self.details = Some(detail);
    }
}

/// Arithmetic mean of `scores`, or `None` for an empty list.
#[must_use]
pub fn average_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = scores.len() as f64;
    Some(scores.iter().sum::<f64>() / len)
}

fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

/// Extended fields returned by `GET /api/stores/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<PriceLevel>,
    #[serde(
        rename = "type",
        alias = "categories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_stars: Option<f64>,
    #[serde(default)]
    pub business_hours: BusinessHours,
    #[serde(default)]
    pub menu: Vec<Product>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Opening spans per weekday, Monday first. A `None` day has no rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours(pub Vec<Option<Vec<[String; 2]>>>);

impl BusinessHours {
    /// Spans for the zero-based weekday (0 = Monday). Days without a rule or
    /// past the end of the list are closed.
    #[must_use]
    pub fn day(&self, weekday: usize) -> &[[String; 2]] {
        self.0
            .get(weekday)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}

/// An item or set of items the store sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Absent when the product is priced per variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub stars: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
