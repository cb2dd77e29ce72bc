use clap::Parser;
use trip_backend::{AppState, config::AppConfig, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_backend=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::parse();
    tracing::debug!("configuration: {config:?}");
    tracing::info!(
        "station radii: search {:.1}km, fallback {:.1}km",
        config.search_radius_km,
        config.fallback_radius_km
    );

    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("starting trip planner on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
