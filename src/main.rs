//! Tip distributor HTTP server.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tip_distributor::api::{AppState, create_router};
use tip_distributor::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::from_env()?.into_config();
    let addr = config.bind_address;
    info!(
        max_upload_bytes = config.max_upload_bytes,
        two_digit_year_reference = ?config.two_digit_year_reference,
        "Starting tip distributor"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
