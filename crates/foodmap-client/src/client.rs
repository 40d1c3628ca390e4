//! HTTP client for the store catalog endpoints.
//!
//! Wraps `reqwest` with a bounded timeout, retry on transient failures and
//! shape checks on every body, so a bad response surfaces as a typed
//! [`ClientError`] instead of a half-populated catalog.

use std::time::Duration;

use foodmap_core::{AppConfig, StoreDetail, StoreId, StoreRecord};
use reqwest::{Client, StatusCode, Url};

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

/// Client for the store catalog.
///
/// Use [`FoodmapClient::from_config`] in the binary or
/// [`FoodmapClient::new`] to point at a mock server in tests.
pub struct FoodmapClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FoodmapClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse
    /// as a hierarchical URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so a path prefix like `/foodmap` is kept
        // when the endpoint segments are appended.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// # Errors
    ///
    /// See [`FoodmapClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// `GET /api/stores`
    ///
    /// # Errors
    ///
    /// - [`ClientError::Malformed`] if the body is not a JSON array.
    /// - [`ClientError::Deserialize`] if an element is not a store record.
    /// - [`ClientError::Http`], [`ClientError::NotFound`] or
    ///   [`ClientError::UnexpectedStatus`] for transport failures.
    pub async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, ClientError> {
        let url = self.endpoint(&["api", "stores"]);
        let body = self.get_json(&url).await?;
        let records = decode_array::<StoreRecord>(body, "GET /api/stores")?;
        tracing::debug!(count = records.len(), "fetched store list");
        Ok(records)
    }

    /// `GET /api/types`
    ///
    /// # Errors
    ///
    /// - [`ClientError::Malformed`] if the body is not a JSON array.
    /// - [`ClientError::Deserialize`] if an element is not a string.
    /// - Transport errors as for [`FoodmapClient::fetch_stores`].
    pub async fn fetch_tags(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["api", "types"]);
        let body = self.get_json(&url).await?;
        let tags = decode_array::<String>(body, "GET /api/types")?;
        tracing::debug!(count = tags.len(), "fetched tag vocabulary");
        Ok(tags)
    }

    /// `GET /api/stores/{id}`
    ///
    /// Accepts a bare store object or one wrapped as `{"data":{"store":{..}}}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Malformed`] if the body holds no store object.
    /// - [`ClientError::Deserialize`] if the object has the wrong field types.
    /// - Transport errors as for [`FoodmapClient::fetch_stores`].
    pub async fn fetch_store_details(&self, id: &StoreId) -> Result<StoreDetail, ClientError> {
        let url = self.endpoint(&["api", "stores", id.as_str()]);
        let body = self.get_json(&url).await?;
        let context = format!("GET /api/stores/{id}");

        let store = match body.pointer("/data/store") {
            Some(inner) => inner.clone(),
            None => body,
        };
        if !store.is_object() {
            return Err(ClientError::Malformed {
                context,
                reason: "expected a store object".to_owned(),
            });
        }

        serde_json::from_value(store).map_err(|e| ClientError::Deserialize { context, source: e })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET with retry, maps non-2xx statuses to typed errors and
    /// parses the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound {
                    url: url.to_string(),
                });
            }
            if !status.is_success() {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        })
        .await
    }
}

/// Checks that `body` is a JSON array before decoding its elements.
fn decode_array<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
    context: &str,
) -> Result<Vec<T>, ClientError> {
    if !body.is_array() {
        return Err(ClientError::Malformed {
            context: context.to_owned(),
            reason: format!("expected a JSON array, got {}", json_kind(&body)),
        });
    }
    serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> FoodmapClient {
        FoodmapClient::new(base_url, 5, "foodmap-test/0.1", 0, 0)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_segments_to_root() {
        let client = test_client("http://localhost:8080");
        assert_eq!(
            client.endpoint(&["api", "stores"]).as_str(),
            "http://localhost:8080/api/stores"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = test_client("https://example.com/foodmap/");
        assert_eq!(
            client.endpoint(&["api", "types"]).as_str(),
            "https://example.com/foodmap/api/types"
        );
    }

    #[test]
    fn endpoint_encodes_store_id() {
        let client = test_client("http://localhost:8080");
        let url = client.endpoint(&["api", "stores", "a/b c"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/stores/a%2Fb%20c");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = FoodmapClient::new("not a url", 5, "ua", 0, 0).err().unwrap();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn decode_array_rejects_objects() {
        let err = decode_array::<String>(serde_json::json!({"stores": []}), "GET /api/types")
            .unwrap_err();
        assert!(
            matches!(err, ClientError::Malformed { ref reason, .. } if reason.contains("an object")),
            "got: {err:?}"
        );
    }
}
