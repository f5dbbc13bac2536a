//! Router assembly shared by the binary and the HTTP tests.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn, routing::get, Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AuthConfig, Config, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::admin::routes as admin_routes;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::auth::ConfiguredCredentialVerifier;
use crate::features::categories::routes as categories_routes;
use crate::features::reports::{
    routes as reports_routes, IntakeService, ReportRepository, ReportService,
};

/// Services the HTTP layer depends on
#[derive(Clone)]
pub struct AppServices {
    pub intake_service: Arc<IntakeService>,
    pub report_service: Arc<ReportService>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
}

impl AppServices {
    pub fn new(repository: Arc<dyn ReportRepository>, auth: &AuthConfig) -> Self {
        let token_service = Arc::new(TokenService::new(auth));
        let verifier = Arc::new(ConfiguredCredentialVerifier::new(auth));
        let auth_service = Arc::new(AuthService::new(verifier, Arc::clone(&token_service)));

        Self {
            intake_service: Arc::new(IntakeService::new(Arc::clone(&repository))),
            report_service: Arc::new(ReportService::new(repository)),
            auth_service,
            token_service,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(swagger: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let ui =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        ui.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        ui
    }
}

/// Build the full application router
pub fn build_router(services: AppServices, config: &Config) -> Router {
    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .nest(
            "/api/admin",
            admin_routes::routes(Arc::clone(&services.report_service)),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.token_service),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(services.auth_service))
        .merge(reports_routes::routes(
            services.intake_service,
            services.report_service,
        ))
        .merge(categories_routes::routes())
        .route("/health", get(health_check));

    Router::new()
        .merge(swagger_routes(&config.swagger))
        .merge(protected_routes)
        .merge(public_routes)
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
                .layer(middleware::timeout_layer(config.app.request_timeout)),
        )
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
