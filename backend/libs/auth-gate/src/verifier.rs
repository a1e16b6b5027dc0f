/// Token verification against a resolved key set
///
/// ## Security Design
///
/// - **RS256 ONLY**: the algorithm allow-list has exactly one entry, so a
///   token header cannot downgrade verification to a symmetric algorithm
/// - **Key selection by `kid`**: only the key the token names is tried
/// - **All-or-nothing**: signature, audience, issuer and expiry must all pass
///   before a `Claims` value is produced
use jsonwebtoken::{
    decode, decode_header, errors::ErrorKind, Algorithm, DecodingKey, Validation,
};
use tracing::debug;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwks::{Jwk, JwkSet};

/// JWT algorithm allow-list
const ALLOWED_ALGORITHM: Algorithm = Algorithm::RS256;

/// Registered claims a token must carry
const REQUIRED_CLAIMS: [&str; 3] = ["exp", "aud", "iss"];

/// Verify `token` with the key its header names and return its claims
///
/// ## Errors
///
/// - `TokenMalformed` when the header cannot be decoded, the key material is
///   unusable, or the signature/structure is invalid
/// - `MalformedToken` when the header has no `kid`
/// - `SigningKeyNotFound` when no key in `jwks` has that `kid`
/// - `TokenExpired` when `exp` has passed
/// - `ClaimsInvalid` on audience/issuer mismatch or a missing registered claim
pub fn verify_token(token: &str, jwks: &JwkSet, config: &AuthConfig) -> Result<Claims, AuthError> {
    let header = decode_header(token).map_err(|e| AuthError::TokenMalformed(e.to_string()))?;

    let kid = header.kid.ok_or(AuthError::MalformedToken)?;

    let jwk = jwks
        .find(&kid)
        .ok_or_else(|| AuthError::SigningKeyNotFound(kid.clone()))?;

    let decoding_key = rsa_decoding_key(jwk)?;

    let mut validation = Validation::new(ALLOWED_ALGORITHM);
    validation.set_audience(&[config.audience.as_str()]);
    validation.set_issuer(&[config.issuer()]);
    validation.set_required_spec_claims(&REQUIRED_CLAIMS);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = config.leeway_secs;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        debug!(%kid, error = %e, "Token verification failed");
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAudience
            | ErrorKind::InvalidIssuer
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => AuthError::ClaimsInvalid(e.to_string()),
            _ => AuthError::TokenMalformed(e.to_string()),
        }
    })?;

    Ok(token_data.claims)
}

fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    if !jwk.kty.eq_ignore_ascii_case("RSA") {
        return Err(AuthError::TokenMalformed(format!(
            "signing key has unsupported type {}",
            jwk.kty
        )));
    }

    match (jwk.n.as_deref(), jwk.e.as_deref()) {
        (Some(n), Some(e)) => DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AuthError::TokenMalformed(format!("unusable signing key: {e}"))),
        _ => Err(AuthError::TokenMalformed(
            "signing key has no RSA parameters".to_string(),
        )),
    }
}
