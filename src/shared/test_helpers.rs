use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware::Next, Router};
use axum_test::TestServer;
use sha2::{Digest, Sha256};

use crate::app::{build_router, AppServices};
use crate::core::config::{AppConfig, AuthConfig, Config, StorageConfig, SwaggerConfig};
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::reports::models::Report;
use crate::features::reports::seed::demo_reports;
use crate::features::reports::{InMemoryReportRepository, ReportRepository};

pub const TEST_ADMIN_EMAIL: &str = "admin@university.edu";
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";

/// The three sample cases, in submission order
pub fn sample_reports() -> Vec<Report> {
    demo_reports()
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 64 * 1024,
            request_timeout: Duration::from_secs(10),
        },
        storage: StorageConfig {
            database: None,
            seed_demo_reports: false,
        },
        auth: AuthConfig {
            admin_email: Some(TEST_ADMIN_EMAIL.to_string()),
            admin_password_sha256: Some(hex::encode(Sha256::digest(
                TEST_ADMIN_PASSWORD.as_bytes(),
            ))),
            jwt_secret: Some("test-jwt-secret".to_string()),
            issuer: "safevoice-core".to_string(),
            token_ttl: Duration::from_secs(600),
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "SafeVoice API".to_string(),
            version: "test".to_string(),
            description: "test".to_string(),
        },
    }
}

/// Running application backed by an in-memory registry
pub struct TestApp {
    pub server: TestServer,
    pub services: AppServices,
    pub repository: Arc<InMemoryReportRepository>,
}

impl TestApp {
    /// Bearer token for the configured admin
    pub fn admin_token(&self) -> String {
        self.services
            .token_service
            .issue(&AuthenticatedAdmin::admin(TEST_ADMIN_EMAIL))
            .expect("token should be issued")
            .access_token
    }
}

pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let repository = Arc::new(InMemoryReportRepository::new());
    let services = AppServices::new(
        Arc::clone(&repository) as Arc<dyn ReportRepository>,
        &config.auth,
    );
    let server = TestServer::new(build_router(services.clone(), &config))
        .expect("test server should start");

    TestApp {
        server,
        services,
        repository,
    }
}

/// Same as [`spawn_app`] with the sample cases already registered
pub async fn spawn_seeded_app() -> TestApp {
    let app = spawn_app().await;
    for report in sample_reports() {
        app.repository
            .insert(report)
            .await
            .expect("sample report should insert");
    }
    app
}

/// Wrap a router so every request carries the given identity, bypassing token checks
pub fn with_identity(router: Router, identity: AuthenticatedAdmin) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let identity = identity.clone();
            async move {
                request.extensions_mut().insert(identity);
                next.run(request).await
            }
        },
    ))
}

