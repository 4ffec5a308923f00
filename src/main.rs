//! Complaint management service entry point

use complaint_service::{
    auth::jwt::TokenService,
    auth::password::PasswordHasher,
    config::AppConfig,
    db,
    middleware::AppState,
    repository::PgUserStore,
    routes,
    services::{mailer_from_config, AuthService},
    telemetry,
};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env files in development; production sets real env vars.
    // Priority: .env.local > .env.development > .env
    if let Ok(profile) = std::env::var("CMS_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 1. Configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. Logging
    telemetry::init_telemetry(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Complaint service starting..."
    );

    // 3. Database pool + migrations
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. Application state
    let shared_config = Arc::new(config.clone());
    let users: Arc<dyn complaint_service::repository::UserStore> =
        Arc::new(PgUserStore::new(db_pool.clone()));
    let token_service = Arc::new(TokenService::from_config(&config)?);
    let hasher = Arc::new(PasswordHasher::new());
    let mailer = mailer_from_config(&config.email)?;

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        token_service.clone(),
        hasher.clone(),
        mailer,
        shared_config,
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool.clone(),
        users,
        auth_service,
        token_service,
        hasher,
    });

    // 5. Router
    let app = routes::create_router(app_state);

    // 6. Serve
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // The drain deadline starts counting when the signal fires, not before,
    // so a quiet shutdown returns immediately and a busy one is bounded.
    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();

    let graceful = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signal_tx.send(());
        })
        .into_future();
    tokio::pin!(graceful);

    tokio::select! {
        result = &mut graceful => result?,
        _ = drain_deadline(signal_rx, config.server.graceful_shutdown_timeout_secs) => {
            tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves when a shutdown signal arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// Upper bound on draining in-flight requests. Pending until the shutdown
/// signal fires, then resolves `timeout_secs` later.
async fn drain_deadline(signal: tokio::sync::oneshot::Receiver<()>, timeout_secs: u64) {
    if signal.await.is_err() {
        // Sender dropped without a signal: the server ended on its own
        std::future::pending::<()>().await;
    }

    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
}
