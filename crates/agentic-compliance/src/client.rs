//! HTTP client for the off-chain attribute-store boundary.

use std::collections::HashMap;

use serde_json::Value;

use crate::{error::Error, models::common::ApiErrorBody};

/// Read-only access to a subject's off-chain attributes, keyed by the
/// subject's canonical hash (never the raw subject identifier).
#[async_trait::async_trait]
pub trait AttributeStore: std::fmt::Debug + Send + Sync {
    /// Fetches the opaque attribute map for a subject hash.
    async fn get_attributes(&self, subject_hash: &str) -> Result<HashMap<String, Value>, Error>;
}

/// Async HTTP client for an off-chain attribute store.
pub struct AttributeStoreClient {
    base_url: String,
    api_key: String,
    http: hpx::Client,
}

impl std::fmt::Debug for AttributeStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeStoreClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl AttributeStoreClient {
    /// Creates a new client pointed at the given attribute-store base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), api_key: api_key.into(), http: hpx::Client::new() }
    }
}

#[async_trait::async_trait]
impl AttributeStore for AttributeStoreClient {
    async fn get_attributes(&self, subject_hash: &str) -> Result<HashMap<String, Value>, Error> {
        let url = format!("{}/v1/attributes/{}", self.base_url, subject_hash);
        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Request-Id", uuid::Uuid::new_v4().to_string())
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if resp.status().is_success() {
            resp.json::<HashMap<String, Value>>().await.map_err(|e| Error::Http(e.to_string()))
        } else {
            let err: ApiErrorBody = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;
            Err(Error::Api { code: err.code, message: err.message })
        }
    }
}

/// An in-memory attribute store for tests and deployments with no off-chain
/// PII system wired up yet. Subjects absent from the map have no attributes.
#[derive(Debug, Default)]
pub struct InMemoryAttributeStore {
    by_subject_hash: HashMap<String, HashMap<String, Value>>,
}

impl InMemoryAttributeStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds attributes for a subject hash (test/bootstrap helper).
    pub fn insert(&mut self, subject_hash: impl Into<String>, attributes: HashMap<String, Value>) {
        self.by_subject_hash.insert(subject_hash.into(), attributes);
    }
}

#[async_trait::async_trait]
impl AttributeStore for InMemoryAttributeStore {
    async fn get_attributes(&self, subject_hash: &str) -> Result<HashMap<String, Value>, Error> {
        Ok(self.by_subject_hash.get(subject_hash).cloned().unwrap_or_default())
    }
}
