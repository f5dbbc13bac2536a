use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedAdmin;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
    iss: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 admin tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        match &config.jwt_secret {
            Some(secret) => Self::from_secret(secret.as_bytes(), &config.issuer, config.token_ttl),
            None => {
                tracing::warn!(
                    "JWT_SECRET not set, using a random per-process secret; tokens will not survive a restart"
                );
                let secret: [u8; 32] = rand::random();
                Self::from_secret(&secret, &config.issuer, config.token_ttl)
            }
        }
    }

    pub fn from_secret(secret: &[u8], issuer: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.to_string(),
            ttl,
        }
    }

    pub fn issue(&self, identity: &AuthenticatedAdmin) -> Result<IssuedToken> {
        let iat = Utc::now().timestamp();
        let expires_in = self.ttl.as_secs() as i64;
        self.sign(identity, iat, iat + expires_in)
            .map(|access_token| IssuedToken {
                access_token,
                expires_in,
            })
    }

    fn sign(&self, identity: &AuthenticatedAdmin, iat: i64, exp: i64) -> Result<String> {
        let claims = Claims {
            sub: identity.sub.clone(),
            roles: identity.roles.clone(),
            iss: self.issuer.clone(),
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign admin token: {}", e);
            AppError::Internal("Failed to issue token".to_string())
        })
    }

    pub fn validate(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthenticatedAdmin {
            sub: token_data.claims.sub,
            roles: token_data.claims.roles,
        })
    }
}
