use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// `aud` may be a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Multiple(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Verified JWT body
///
/// Registered claims are typed; every other claim the identity provider
/// issued is kept verbatim in `extra`, so re-serializing yields the same
/// payload that was signed. NumericDate claims may be fractional and are
/// kept as the JSON number they arrived as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: Audience,
    pub exp: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<Number>,
    /// `None` when the claim is absent, which is distinct from an empty array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_claims_survive_round_trip() {
        let raw = json!({
            "iss": "https://casting.example.com/",
            "aud": ["casting", "https://casting.example.com/userinfo"],
            "exp": 1_900_000_000,
            "sub": "auth0|director",
            "azp": "client-id",
            "scope": "openid profile",
            "permissions": ["get:movies", "post:actors"]
        });

        let claims: Claims = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(claims.extra.get("azp"), Some(&json!("client-id")));
        assert!(claims.aud.contains("casting"));
        assert_eq!(serde_json::to_value(&claims).unwrap(), raw);
    }

    #[test]
    fn test_absent_permissions_differs_from_empty() {
        let base = json!({
            "iss": "https://casting.example.com/",
            "aud": "casting",
            "exp": 1_900_000_000
        });
        let claims: Claims = serde_json::from_value(base.clone()).unwrap();
        assert!(claims.permissions.is_none());

        let mut with_empty = base;
        with_empty["permissions"] = json!([]);
        let claims: Claims = serde_json::from_value(with_empty).unwrap();
        assert_eq!(claims.permissions, Some(vec![]));
        assert!(!claims.has_permission("get:movies"));
    }

    #[test]
    fn test_fractional_dates_survive_round_trip() {
        let raw = json!({
            "iss": "https://casting.example.com/",
            "aud": "casting",
            "exp": 1_900_000_000.5,
            "iat": 1_899_996_400.25,
            "nbf": 1_899_996_400
        });

        let claims: Claims = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(claims.exp.as_f64(), Some(1_900_000_000.5));
        assert_eq!(claims.nbf.as_ref().and_then(Number::as_i64), Some(1_899_996_400));
        assert_eq!(serde_json::to_value(&claims).unwrap(), raw);
    }
}
