use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::credentials::CredentialVerifier;
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto};
use crate::features::auth::services::token_service::TokenService;

/// Service for admin login
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, token_service: Arc<TokenService>) -> Self {
        Self {
            verifier,
            token_service,
        }
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let admin = self
            .verifier
            .verify(&dto.email, &dto.password)
            .await?
            .ok_or_else(|| {
                tracing::info!("Admin login rejected");
                AppError::Unauthorized("Invalid credentials".to_string())
            })?;

        let issued = self.token_service.issue(&admin)?;
        tracing::info!(sub = %admin.sub, "Admin login succeeded");

        Ok(AuthResponseDto {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedAdmin;
    use async_trait::async_trait;
    use std::time::Duration;

    struct StaticVerifier;

    #[async_trait]
    impl CredentialVerifier for StaticVerifier {
        async fn verify(&self, email: &str, password: &str) -> Result<Option<AuthenticatedAdmin>> {
            Ok((email == "admin@university.edu" && password == "s3cret")
                .then(|| AuthenticatedAdmin::admin(email)))
        }
    }

    struct BrokenVerifier;

    #[async_trait]
    impl CredentialVerifier for BrokenVerifier {
        async fn verify(&self, _: &str, _: &str) -> Result<Option<AuthenticatedAdmin>> {
            Err(AppError::Internal("directory unavailable".to_string()))
        }
    }

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::from_secret(
            b"test-secret",
            "safevoice-core",
            Duration::from_secs(900),
        ))
    }

    fn login(email: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_bearer_token() {
        let tokens = tokens();
        let service = AuthService::new(Arc::new(StaticVerifier), tokens.clone());

        let response = service
            .login(login("admin@university.edu", "s3cret"))
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
        let admin = tokens.validate(&response.access_token).unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let service = AuthService::new(Arc::new(StaticVerifier), tokens());

        let err = service
            .login(login("admin@university.edu", "guess"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_login_propagates_verifier_failure() {
        let service = AuthService::new(Arc::new(BrokenVerifier), tokens());

        let err = service
            .login(login("admin@university.edu", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
