//! HTTP client for the NMKR-style NFT issuer, with a bounded mint queue,
//! an external rate limit, and jittered exponential backoff on transport
//! failure.

use std::{
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

use governor::{Quota, RateLimiter};
use tokio::sync::Semaphore;

use crate::{
    error::Error,
    models::mint::{MintRequest, MintResponse},
};

/// Configuration for the NFT issuer gateway's backpressure and timeout
/// behavior (`spec.md` §5, §6).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Per-call timeout before a request fails with [`Error::TransportTimeout`].
    pub mint_timeout: Duration,
    /// Bounded local queue depth; submissions beyond this are rejected, not
    /// blocked.
    pub mint_queue_depth: usize,
    /// The external issuer's rate limit, requests per minute.
    pub rate_limit_per_minute: u32,
    /// Maximum retry attempts for transient transport failures.
    pub max_retry_attempts: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mint_timeout: Duration::from_millis(30_000),
            mint_queue_depth: 256,
            rate_limit_per_minute: 60,
            max_retry_attempts: 5,
        }
    }
}

/// Async HTTP client for the NMKR-style NFT issuer gateway (`C2`).
pub struct NftGatewayClient {
    base_url: String,
    api_key: String,
    policy_id: String,
    http: hpx::Client,
    config: GatewayConfig,
    queue_slots: Arc<Semaphore>,
    rate_limiter: Arc<RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>>,
}

impl std::fmt::Debug for NftGatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftGatewayClient")
            .field("base_url", &self.base_url)
            .field("policy_id", &self.policy_id)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl NftGatewayClient {
    /// Creates a new client using caller-supplied configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        policy_id: impl Into<String>,
        config: GatewayConfig,
    ) -> Self {
        let per_minute = NonZeroU32::new(config.rate_limit_per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        let queue_slots = Arc::new(Semaphore::new(config.mint_queue_depth));
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            policy_id: policy_id.into(),
            http: hpx::Client::new(),
            config,
            queue_slots,
            rate_limiter,
        }
    }

    /// The policy id this gateway mints under.
    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    /// Submits a mint request.
    ///
    /// Acquires a bounded queue slot (rejecting with [`Error::QueueFull`]
    /// rather than blocking when the queue is saturated), checks the
    /// external issuer's rate limit (rejecting with [`Error::RateLimited`]
    /// when exceeded), then dispatches the HTTP call with a timeout and
    /// jittered exponential backoff on transient transport failure.
    pub async fn mint(&self, req: &MintRequest) -> Result<MintResponse, Error> {
        let _permit = self.queue_slots.try_acquire().map_err(|_| Error::QueueFull {
            depth: self.config.mint_queue_depth,
        })?;

        if self.rate_limiter.check().is_err() {
            return Err(Error::RateLimited { retry_after_ms: 1_000 });
        }

        self.post_with_retry(req).await
    }

    async fn post_with_retry(&self, req: &MintRequest) -> Result<MintResponse, Error> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.post_once(req).await {
                Ok(resp) => return Ok(resp),
                Err(Error::TransportFailed(msg)) if attempt < self.config.max_retry_attempts => {
                    let backoff = jittered_backoff(attempt);
                    tracing::warn!(
                        attempt,
                        error = %msg,
                        backoff_ms = backoff.as_millis() as u64,
                        "mint submission failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_once(&self, req: &MintRequest) -> Result<MintResponse, Error> {
        let url = format!("{}/mint", self.base_url);
        let send = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Request-Id", req.idempotency_key.clone())
            .json(req)
            .send();

        let resp = match tokio::time::timeout(self.config.mint_timeout, send).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(Error::TransportFailed(e.to_string())),
            Err(_) => return Err(Error::TransportTimeout(self.config.mint_timeout.as_millis() as u64)),
        };

        if resp.status().is_success() {
            resp.json::<MintResponse>().await.map_err(|e| Error::TransportFailed(e.to_string()))
        } else {
            let err: crate::models::common::ApiErrorBody =
                resp.json().await.map_err(|e| Error::TransportFailed(e.to_string()))?;
            Err(Error::Api { code: err.code, message: err.message })
        }
    }
}

/// Exponential backoff with full jitter, capped at 30s, for the given
/// 1-indexed attempt number.
fn jittered_backoff(attempt: u32) -> Duration {
    let base_ms = 200u64.saturating_mul(1u64 << attempt.min(10));
    let capped_ms = base_ms.min(30_000);
    let jitter_ms = rand::random::<u64>() % capped_ms.max(1);
    Duration::from_millis(jitter_ms.max(50))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_but_stays_capped() {
        let small = jittered_backoff(1);
        let large = jittered_backoff(8);
        assert!(small.as_millis() <= 30_000);
        assert!(large.as_millis() <= 30_000);
    }

    #[tokio::test]
    async fn queue_rejects_beyond_depth() {
        let client = NftGatewayClient::new(
            "key",
            "https://issuer.example",
            "policy1",
            GatewayConfig { mint_queue_depth: 1, ..GatewayConfig::default() },
        );
        let _first = client.queue_slots.try_acquire().unwrap();
        let second = client.queue_slots.try_acquire();
        assert!(second.is_err());
    }
}
