use thiserror::Error;

/// Errors returned by [`crate::FoodmapClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, timeout or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body is not JSON, or its elements don't match the record shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body is JSON but not the expected container (e.g. an object
    /// where a list was expected).
    #[error("malformed response from {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
