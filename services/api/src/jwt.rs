//! JWT service for token generation and validation
//!
//! This module provides functionality for creating and validating the
//! bearer tokens issued at login, using the HS256 algorithm over a
//! process-wide secret. Tokens carry the user id and admin flag and are
//! valid for a fixed lifetime; expiry is the only invalidation mechanism
//! (there is no revocation list).

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret used for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 1 hour)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 3600)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "3600".to_string()) // 1 hour
            .parse()
            .unwrap_or(3600);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i32,
    /// Administrator flag
    pub admin: bool,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        // A token is invalid from its exact expiry instant onwards.
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a token asserting a user's identity and privilege
    pub fn issue(&self, user_id: i32, admin: bool) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            admin,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Verify a token and return the claims
    ///
    /// Fails when the signature is invalid, the payload is malformed, or
    /// the token has expired.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the token expiry time in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_expiry(expiry: u64) -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry: expiry,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = service_with_expiry(3600);

        let token = service.issue(42, true).expect("Failed to issue token");
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, 42);
        assert!(claims.admin);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_verify_preserves_non_admin_flag() {
        let service = service_with_expiry(3600);

        let token = service.issue(7, false).expect("Failed to issue token");
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, 7);
        assert!(!claims.admin);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service_with_expiry(3600);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Failed to get current time")
            .as_secs();
        let claims = Claims {
            sub: 1,
            admin: false,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .expect("Failed to encode token");

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = service_with_expiry(3600);
        let other = JwtService::new(JwtConfig {
            secret: "another-secret".to_string(),
            token_expiry: 3600,
        });

        let token = service.issue(1, true).expect("Failed to issue token");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_corrupted_token_is_rejected() {
        let service = service_with_expiry(3600);

        let mut token = service.issue(1, true).expect("Failed to issue token");
        token.push('x');
        assert!(service.verify(&token).is_err());

        assert!(service.verify("not-a-token").is_err());
    }
}
