/// JWKS (JSON Web Key Set) resolution
///
/// The reference behaviour fetches the identity provider's key set on every
/// verification. `CachingKeySetResolver` can wrap any resolver to reuse a
/// fetched set for a bounded time; it is only installed when a cache TTL is
/// configured.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::AuthError;

/// Public signing key (subset of RFC 7517)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// RSA modulus, base64url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA exponent, base64url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.kid.as_deref() == Some(kid))
    }
}

/// Source of the current signing keys
#[async_trait]
pub trait KeySetResolver: Send + Sync {
    async fn resolve(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches the key set over HTTP on every call
pub struct HttpKeySetResolver {
    url: String,
    timeout: Duration,
    http_client: Client,
}

impl HttpKeySetResolver {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            http_client: Client::new(),
        }
    }
}

#[async_trait]
impl KeySetResolver for HttpKeySetResolver {
    async fn resolve(&self) -> Result<JwkSet, AuthError> {
        debug!(url = %self.url, "Fetching signing key set");

        let response = self
            .http_client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "Signing key set request failed");
                AuthError::KeySetUnavailable(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "Signing key set endpoint returned error status");
            return Err(AuthError::KeySetUnavailable(format!("HTTP {status}")));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Signing key set is not valid JSON");
            AuthError::KeySetUnavailable(format!("invalid key set: {e}"))
        })
    }
}

/// Serves a fixed key set
#[derive(Debug, Clone, Default)]
pub struct StaticKeySetResolver {
    jwks: JwkSet,
}

impl StaticKeySetResolver {
    pub fn new(jwks: JwkSet) -> Self {
        Self { jwks }
    }
}

#[async_trait]
impl KeySetResolver for StaticKeySetResolver {
    async fn resolve(&self) -> Result<JwkSet, AuthError> {
        Ok(self.jwks.clone())
    }
}

struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// Reuses the inner resolver's last key set for `ttl`
///
/// Failed fetches are not cached.
pub struct CachingKeySetResolver<R> {
    inner: R,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<R: KeySetResolver> CachingKeySetResolver<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Drop the cached key set so the next call fetches live keys
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    fn fresh(&self, entry: &CacheEntry) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }
}

#[async_trait]
impl<R: KeySetResolver> KeySetResolver for CachingKeySetResolver<R> {
    async fn resolve(&self) -> Result<JwkSet, AuthError> {
        if let Some(entry) = self.entry.read().await.as_ref() {
            if self.fresh(entry) {
                debug!("Using cached signing key set");
                return Ok(entry.jwks.clone());
            }
        }

        let mut guard = self.entry.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(entry) = guard.as_ref() {
            if self.fresh(entry) {
                return Ok(entry.jwks.clone());
            }
        }

        let jwks = self.inner.resolve().await?;
        *guard = Some(CacheEntry {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        debug!(keys = jwks.keys.len(), ttl_secs = self.ttl.as_secs(), "Cached signing key set");

        Ok(jwks)
    }
}
