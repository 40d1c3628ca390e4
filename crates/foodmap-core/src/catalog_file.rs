//! YAML stand-in for the remote store catalog.
//!
//! ```yaml
//! types: [coffee, breakfast]
//! stores:
//!   - id: 1
//!     name: A Cafe
//!     location: [25.0321, 121.54257]
//!     price_level: "$"
//!     type: [coffee]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::store::StoreRecord;
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    let catalog: CatalogFile = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in &catalog.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }

        if let Some(id) = &store.id {
            if !seen_ids.insert(id.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate store id: '{id}' (store '{}')",
                    store.name
                )));
            }
        }
    }

    Ok(())
}
