use foodmap_core::{CoreError, StoreId};
use thiserror::Error;

use crate::map::MarkerId;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The store data source failed or returned something unusable.
    #[error("store source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("duplicate store id in catalog: {0}")]
    DuplicateStoreId(StoreId),

    #[error("unknown store: {0}")]
    UnknownStore(StoreId),

    #[error("unknown marker: {0}")]
    UnknownMarker(MarkerId),

    /// Filtering was attempted after catalog initialisation failed.
    #[error("filter controls are disabled")]
    ControlsDisabled,

    #[error("filter control error: {0}")]
    Controls(CoreError),
}

impl EngineError {
    pub(crate) fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ControlsDisabled => Self::ControlsDisabled,
            other => Self::Controls(other),
        }
    }
}
