/// Authorization gate configuration
///
/// Built explicitly and handed to `AuthGate::new`, so several gates with
/// different identity providers can coexist in one process.
use std::time::Duration;
use thiserror::Error;

const DEFAULT_JWKS_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity-provider host, e.g. `casting.eu.auth0.com`
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Key-set location; derived from `domain` when unset
    pub jwks_url: Option<String>,
    /// Upper bound for one key-set fetch
    pub jwks_timeout: Duration,
    /// Clock-skew leeway applied to `exp` and `nbf`
    pub leeway_secs: u64,
    /// Reuse a fetched key set for this long. `None` always fetches live keys.
    pub jwks_cache_ttl: Option<Duration>,
}

impl AuthConfig {
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            audience: audience.into(),
            jwks_url: None,
            jwks_timeout: Duration::from_secs(DEFAULT_JWKS_TIMEOUT_SECS),
            leeway_secs: 0,
            jwks_cache_ttl: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// `AUTH_DOMAIN` and `API_AUDIENCE` are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let domain = required("AUTH_DOMAIN")?;
        let audience = required("API_AUDIENCE")?;

        let cache_ttl_secs = parsed("AUTH_JWKS_CACHE_TTL_SECS", 0)?;
        let timeout_secs = parsed("AUTH_JWKS_TIMEOUT_SECS", DEFAULT_JWKS_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "AUTH_JWKS_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        Ok(Self {
            domain,
            audience,
            jwks_url: std::env::var("AUTH_JWKS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            jwks_timeout: Duration::from_secs(timeout_secs),
            leeway_secs: parsed("AUTH_LEEWAY_SECS", 0)?,
            jwks_cache_ttl: (cache_ttl_secs > 0).then(|| Duration::from_secs(cache_ttl_secs)),
        })
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = Some(url.into());
        self
    }

    pub fn with_jwks_timeout(mut self, timeout: Duration) -> Self {
        self.jwks_timeout = timeout;
        self
    }

    pub fn with_jwks_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = Some(ttl);
        self
    }

    /// Expected `iss` claim
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", self.domain))
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
