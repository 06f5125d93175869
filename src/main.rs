use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use storefront::build_app;
use storefront::infrastructure::{config::load_config, logger::Logger, open_repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("failed to load configuration")?;

    // guard 在进程结束前一直持有
    let _log_guard = Logger::init(&config.logging).context("failed to initialise logging")?;

    match &source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }
    info!("Starting storefront server...");

    let repo = open_repository(&config.database).await.map_err(|e| {
        error!("Failed to initialize storage: {}", e);
        e
    })?;

    let app = build_app(repo.clone(), &config.http);

    let listener = TcpListener::bind(config.http.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.http.socket_addr()))?;
    let addr = listener.local_addr()?;

    info!("🚀 Storefront server running on http://{} ({} storage)", addr, repo.backend());
    info!("   POST   /users               - Create user");
    info!("   GET    /users               - List users");
    info!("   GET    /users/with-products - List users with their products");
    info!("   GET    /users/:id           - Get user by ID");
    info!("   GET    /users/:id/products  - List products of a user");
    info!("   POST   /products            - Create product");
    info!("   GET    /products            - List products with owners");
    info!("   GET    /products/:id        - Get product with owner");
    info!("   PUT    /products/:id        - Update product");
    info!("   DELETE /products/:id        - Delete product");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing storage");
    repo.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
