//! # Auth Gate
//!
//! Role-scoped JWT authorization for casting actix services
//!
//! ## Modules
//! - `extract`: bearer token extraction from the `Authorization` header
//! - `jwks`: signing-key discovery (live fetch, optional TTL cache)
//! - `verifier`: RS256 signature and registered-claim verification
//! - `permissions`: `permissions` claim enforcement
//! - `gate`: the linear extract → resolve → verify → check pipeline
//! - `middleware`: actix middleware that guards a resource with one permission

pub mod claims;
pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use claims::{Audience, Claims};
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, ErrorBody};
pub use extract::extract_bearer_token;
pub use gate::AuthGate;
pub use jwks::{
    CachingKeySetResolver, HttpKeySetResolver, Jwk, JwkSet, KeySetResolver, StaticKeySetResolver,
};
pub use middleware::RequirePermission;
pub use permissions::check_permission;
pub use verifier::verify_token;
