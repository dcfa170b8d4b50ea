use std::net::SocketAddr;
use std::str::FromStr;

use tokio::net::TcpListener;
use tracing::{Level, info, warn};

use review_server::config::AppConfig;
use review_server::database::init_db;
use review_server::seed::seed_sample_reviews;
use review_server::state::AppState;
use review_server::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let level = Level::from_str(&config.log.level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("Connecting to database...");
    let db = init_db(&config.database).await?;
    seed_sample_reviews(&db, config.seed.sample_reviews).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState { db, config };
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
