use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Claims carried by access tokens. Permissions are resolved by the
/// external authorization engine at token issuance time; this service
/// only reads them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: u64,
}

/// Validates HS256-signed bearer tokens against the shared secret.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();

        // Issuer and audience claims are only checked when configured
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(ref audience) = config.audience {
            validation.set_audience(&[audience]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = data.claims;
        let username = claims.username.unwrap_or_else(|| claims.sub.clone());

        Ok(AuthenticatedUser {
            sub: claims.sub,
            username,
            permissions: claims.permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: None,
            audience: None,
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn sign(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600
    }

    #[test]
    fn test_valid_token_round_trip() {
        let validator = JwtValidator::new(&test_config("secret"));
        let token = sign(
            "secret",
            &Claims {
                sub: "user-1".to_string(),
                username: Some("alice".to_string()),
                permissions: vec!["prompt:list".to_string()],
                exp: future_exp(),
            },
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.sub, "user-1");
        assert_eq!(user.username, "alice");
        assert!(user.has_permission("prompt:list"));
    }

    #[test]
    fn test_username_falls_back_to_sub() {
        let validator = JwtValidator::new(&test_config("secret"));
        let token = sign(
            "secret",
            &Claims {
                sub: "user-2".to_string(),
                username: None,
                permissions: vec![],
                exp: future_exp(),
            },
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.username, "user-2");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let validator = JwtValidator::new(&test_config("secret"));
        let token = sign(
            "other-secret",
            &Claims {
                sub: "user-3".to_string(),
                username: None,
                permissions: vec![],
                exp: future_exp(),
            },
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let validator = JwtValidator::new(&test_config("secret"));
        let token = sign(
            "secret",
            &Claims {
                sub: "user-4".to_string(),
                username: None,
                permissions: vec![],
                exp: 1_000, // long past, outside any leeway
            },
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
