use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_map::{config::Config, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_map=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    anyhow::ensure!(
        config.speed_meters_per_second > 0.0,
        "SPEED_METERS_PER_SECOND must be positive"
    );

    info!(
        "Starting route map service (speed {} m/s, center {},{} zoom {})",
        config.speed_meters_per_second,
        config.map_center_latitude,
        config.map_center_longitude,
        config.map_zoom
    );

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let app = handlers::router(config);

    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("Shutting down...");
    Ok(())
}
