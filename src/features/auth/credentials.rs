use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::core::config::AuthConfig;
use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedAdmin;

/// Checks a login attempt against whatever holds the admin credentials.
///
/// Returns `Ok(None)` for a wrong email or password. `Err` is reserved for
/// the verifier itself failing.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<AuthenticatedAdmin>>;
}

/// Verifies against a single admin account taken from the environment.
///
/// Only the SHA-256 digest of the password is held. With either half of the
/// credentials missing every attempt is rejected.
pub struct ConfiguredCredentialVerifier {
    email: Option<String>,
    password_sha256: Option<String>,
}

impl ConfiguredCredentialVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            email: config.admin_email.clone(),
            password_sha256: config.admin_password_sha256.clone(),
        }
    }
}

fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

#[async_trait]
impl CredentialVerifier for ConfiguredCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<AuthenticatedAdmin>> {
        let (Some(expected_email), Some(expected_digest)) = (&self.email, &self.password_sha256)
        else {
            tracing::debug!("Admin login attempted but no admin credentials are configured");
            return Ok(None);
        };

        let email = email.trim().to_lowercase();
        // Hash before comparing so a wrong email costs the same as a wrong password
        let digest = sha256_hex(password);

        if email == *expected_email && digest == *expected_digest {
            Ok(Some(AuthenticatedAdmin::admin(email)))
        } else {
            Ok(None)
        }
    }
}
