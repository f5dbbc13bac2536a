mod app;
mod core;
mod features;
mod shared;

use crate::app::{build_router, AppServices};
use crate::core::config::{Config, StorageConfig};
use crate::core::database;
use crate::features::reports::{InMemoryReportRepository, PgReportRepository, ReportRepository};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Configure Tokio runtime
    // TOKIO_WORKER_THREADS env var can override, defaults to CPU count
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Pick the registry backend from configuration
async fn open_registry(storage: &StorageConfig) -> anyhow::Result<Arc<dyn ReportRepository>> {
    match &storage.database {
        Some(db) => {
            let pool = database::connect_registry(db).await?;
            tracing::info!("Report registry: PostgreSQL");
            Ok(Arc::new(PgReportRepository::new(pool)))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set, report registry is in memory and will not survive a restart"
            );
            Ok(Arc::new(InMemoryReportRepository::new()))
        }
    }
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load environment variables (ignore error if .env doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let repository = open_registry(&config.storage).await?;

    if !config.auth.admin_login_enabled() {
        tracing::warn!(
            "ADMIN_EMAIL or ADMIN_PASSWORD_SHA256 not set, every admin login will be rejected"
        );
    }

    let services = AppServices::new(repository, &config.auth);
    tracing::info!("Report and auth services initialized");

    if config.storage.seed_demo_reports {
        let seeded = services
            .report_service
            .seed_demo_reports()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed demo reports: {}", e))?;
        tracing::info!("Demo reports seeded: {}", seeded);
    }

    let app = build_router(services, &config);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
