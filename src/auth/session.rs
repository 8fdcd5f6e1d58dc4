//! Session management for authentication

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Error;
use crate::models::{Id, UserRole};

/// Claims the console reads from the access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The user ID
    pub sub: String,

    #[serde(default)]
    pub role: Option<UserRole>,

    #[serde(default)]
    pub organization_id: Option<Id>,

    /// The expiry timestamp
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Session data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// The token type
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The expiry timestamp
    #[serde(default)]
    pub expires_at: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Create a session from a freshly issued token, taking the expiry
    /// from its `exp` claim when present.
    pub fn new(access_token: String, refresh_token: Option<String>) -> Self {
        let mut session = Self {
            access_token,
            refresh_token,
            token_type: default_token_type(),
            expires_at: None,
        };
        session.expires_at = session.claims().ok().and_then(|c| c.exp);
        session
    }

    /// Decode the token's claims.
    ///
    /// The signature is not checked here; the backend verifies every
    /// request it receives.
    pub fn claims(&self) -> Result<Claims, Error> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<Claims>(&self.access_token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(claims: &Claims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    #[test]
    fn claims_are_read_without_the_secret() {
        let claims = Claims {
            sub: "12".to_string(),
            role: Some(UserRole::Organization),
            organization_id: Some(4),
            exp: Some(Utc::now().timestamp() + 3600),
        };
        let session = Session::new(token(&claims), None);
        assert_eq!(session.claims().unwrap(), claims);
        assert_eq!(session.expires_at, claims.exp);
        assert!(!session.is_expired());
    }

    #[test]
    fn past_expiry_is_expired() {
        let claims = Claims {
            sub: "1".to_string(),
            role: None,
            organization_id: None,
            exp: Some(Utc::now().timestamp() - 10),
        };
        assert!(Session::new(token(&claims), None).is_expired());
    }

    #[test]
    fn opaque_tokens_never_expire() {
        let session = Session::new("not-a-jwt".to_string(), None);
        assert!(session.claims().is_err());
        assert_eq!(session.expires_at, None);
        assert!(!session.is_expired());
    }
}
