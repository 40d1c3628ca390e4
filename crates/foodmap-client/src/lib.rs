//! HTTP client for the foodmap store catalog (`/api/stores`, `/api/types`,
//! `/api/stores/{id}`).

pub mod client;
pub mod error;

mod retry;
mod source;

pub use client::FoodmapClient;
pub use error::ClientError;
