use crate::claims::Claims;
use crate::error::AuthError;

/// Check that `claims` grant `required`
///
/// The `permissions` claim must be present even when `required` is empty;
/// an empty requirement is otherwise always satisfied.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::PermissionsClaimMissing);
    }

    if required.is_empty() || claims.has_permission(required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(required.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Audience;
    use serde_json::Map;

    fn claims(permissions: Option<&[&str]>) -> Claims {
        Claims {
            iss: "https://casting.test.local/".to_string(),
            aud: Audience::Single("casting-api".to_string()),
            exp: serde_json::Number::from(1_900_000_000_i64),
            sub: None,
            iat: None,
            nbf: None,
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_missing_permissions_claim() {
        assert_eq!(
            check_permission("get:movies", &claims(None)),
            Err(AuthError::PermissionsClaimMissing)
        );
        assert_eq!(
            check_permission("", &claims(None)),
            Err(AuthError::PermissionsClaimMissing)
        );
    }

    #[test]
    fn test_permission_granted() {
        let claims = claims(Some(&["get:movies", "get:actors"]));
        assert_eq!(check_permission("get:actors", &claims), Ok(()));
    }

    #[test]
    fn test_permission_denied() {
        let claims = claims(Some(&["get:movies"]));
        assert_eq!(
            check_permission("delete:movies", &claims),
            Err(AuthError::PermissionDenied("delete:movies".to_string()))
        );
    }

    #[test]
    fn test_empty_requirement_with_empty_array() {
        assert_eq!(check_permission("", &claims(Some(&[]))), Ok(()));
    }

    #[test]
    fn test_match_is_exact() {
        let claims = claims(Some(&["get:movies"]));
        assert!(check_permission("get:movie", &claims).is_err());
        assert!(check_permission("GET:MOVIES", &claims).is_err());
    }
}
