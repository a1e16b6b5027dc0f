/// Authorization gate
///
/// Runs the per-request pipeline
/// `extract token → resolve key set → verify token → check permission`.
/// The first failing stage ends the request; nothing is retained between
/// calls apart from the optional key-set cache.
use actix_web::http::header::HeaderValue;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::extract::extract_bearer_token;
use crate::jwks::{CachingKeySetResolver, HttpKeySetResolver, KeySetResolver};
use crate::middleware::RequirePermission;
use crate::permissions::check_permission;
use crate::verifier::verify_token;

#[derive(Clone)]
pub struct AuthGate {
    config: Arc<AuthConfig>,
    resolver: Arc<dyn KeySetResolver>,
}

impl AuthGate {
    /// Gate that fetches keys from the configured identity provider
    pub fn new(config: AuthConfig) -> Self {
        let http = HttpKeySetResolver::new(config.jwks_url(), config.jwks_timeout);

        let resolver: Arc<dyn KeySetResolver> = match config.jwks_cache_ttl {
            Some(ttl) => Arc::new(CachingKeySetResolver::new(http, ttl)),
            None => Arc::new(http),
        };

        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: AuthConfig, resolver: Arc<dyn KeySetResolver>) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authorize one request
    ///
    /// `header` is the raw `Authorization` header value. Returns the verified
    /// claims unchanged when every stage passes.
    pub async fn authorize(
        &self,
        header: Option<&str>,
        required_permission: &str,
    ) -> Result<Claims, AuthError> {
        let result = self.run(header, required_permission).await;
        self.log_outcome(required_permission, &result);
        result
    }

    /// Authorize from the raw header value as received
    ///
    /// A value that is not visible ASCII is a malformed header and is
    /// logged like any other denial.
    pub async fn authorize_header(
        &self,
        header: Option<&HeaderValue>,
        required_permission: &str,
    ) -> Result<Claims, AuthError> {
        match header.map(HeaderValue::to_str).transpose() {
            Ok(header) => self.authorize(header, required_permission).await,
            Err(_) => {
                let result = Err(AuthError::MalformedHeader(
                    "Authorization header must start with Bearer.",
                ));
                self.log_outcome(required_permission, &result);
                result
            }
        }
    }

    fn log_outcome(&self, required_permission: &str, result: &Result<Claims, AuthError>) {
        match result {
            Ok(claims) => debug!(
                permission = required_permission,
                sub = claims.sub.as_deref().unwrap_or("-"),
                "Request authorized"
            ),
            Err(e) => warn!(
                permission = required_permission,
                code = e.code(),
                error = %e,
                "Request denied"
            ),
        }
    }

    async fn run(&self, header: Option<&str>, required_permission: &str) -> Result<Claims, AuthError> {
        let token = extract_bearer_token(header)?;
        let jwks = self.resolver.resolve().await?;
        let claims = verify_token(token, &jwks, &self.config)?;
        check_permission(required_permission, &claims)?;
        Ok(claims)
    }

    /// Middleware that guards the wrapped service with `permission`
    pub fn require(&self, permission: impl Into<String>) -> RequirePermission {
        RequirePermission::new(self.clone(), permission)
    }
}
