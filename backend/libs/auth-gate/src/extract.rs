use crate::error::AuthError;

/// Extract the bearer token from a raw `Authorization` header value
///
/// The token is returned as-is; nothing about it is parsed here.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingHeader),
    };

    let parts: Vec<&str> = header.split_ascii_whitespace().collect();

    match parts.as_slice() {
        [] => Err(AuthError::MalformedHeader(
            "Authorization header must start with Bearer.",
        )),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::MalformedHeader("Authorization header must start with Bearer."),
        ),
        [_] => Err(AuthError::MalformedHeader("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::MalformedHeader(
            "Authorization header must be Bearer token.",
        )),
    }
}
