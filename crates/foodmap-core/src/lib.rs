//! Domain model for the foodmap store finder.
//!
//! Everything in this crate is pure state: store records and their derived
//! fields, the filter predicate, the thermometer price selector and the
//! filter controls that produce a [`FilterRule`]. Networking and map
//! rendering live in `foodmap-client` and `foodmap-engine`.

pub mod app_config;
pub mod catalog_file;
pub mod config;
pub mod controls;
pub mod filter;
pub mod price_selector;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog_file::{load_catalog_file, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env, parse_unset_price_policy};
pub use controls::{FilterControls, TagOption, TagSelection};
pub use filter::{FilterRule, PriceThreshold, UnsetPricePolicy};
pub use price_selector::PriceLevelSelector;
pub use store::{
    average_score, BusinessHours, Comment, Location, PriceLevel, Product, Store, StoreDetail,
    StoreId, StoreRecord, Variant,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("price level selector needs at least one button")]
    NoPriceButtons,

    #[error("price button {index} out of range (selector has {buttons} buttons)")]
    PriceButtonOutOfRange { index: usize, buttons: usize },

    #[error("unknown tag: {0}")]
    UnknownTag(String),

    #[error("filter controls are disabled")]
    ControlsDisabled,
}
