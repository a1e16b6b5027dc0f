/// Error types for the authorization gate
///
/// Every failure of the gate is terminal for the request. Each variant maps to
/// a fixed HTTP status and a `{ "code", "description" }` body; the `Display`
/// text may carry internal detail for logs and is never sent to the client.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingHeader,

    #[error("malformed authorization header: {0}")]
    MalformedHeader(&'static str),

    #[error("signing key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("token header carries no kid")]
    MalformedToken,

    #[error("no signing key matches kid {0:?}")]
    SigningKeyNotFound(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid claims: {0}")]
    ClaimsInvalid(String),

    #[error("unable to parse token: {0}")]
    TokenMalformed(String),

    #[error("permissions claim missing")]
    PermissionsClaimMissing,

    #[error("permission {0:?} not granted")]
    PermissionDenied(String),
}

/// Body returned to the caller for every gate denial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub description: String,
}

impl AuthError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader(_)
            | AuthError::MalformedToken
            | AuthError::SigningKeyNotFound(_)
            | AuthError::TokenMalformed(_) => "invalid_header",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
            AuthError::TokenExpired => "token_expired",
            AuthError::ClaimsInvalid(_) | AuthError::PermissionsClaimMissing => "invalid_claims",
            AuthError::PermissionDenied(_) => "unauthorized",
        }
    }

    /// Human-readable description safe to return to the caller
    pub fn description(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "Authorization header is expected.",
            AuthError::MalformedHeader(reason) => reason,
            AuthError::KeySetUnavailable(_) => "Unable to fetch signing keys.",
            AuthError::MalformedToken => "Authorization malformed.",
            AuthError::SigningKeyNotFound(_) => "Unable to find the appropriate key.",
            AuthError::TokenExpired => "Token expired.",
            AuthError::ClaimsInvalid(_) => {
                "Incorrect claims. Please, check the audience and issuer."
            }
            AuthError::TokenMalformed(_) => "Unable to parse authentication token.",
            AuthError::PermissionsClaimMissing => "Permissions not included in JWT.",
            AuthError::PermissionDenied(_) => "Permission not found.",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader(_)
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::ClaimsInvalid(_) => StatusCode::UNAUTHORIZED,
            AuthError::KeySetUnavailable(_)
            | AuthError::SigningKeyNotFound(_)
            | AuthError::TokenMalformed(_)
            | AuthError::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
