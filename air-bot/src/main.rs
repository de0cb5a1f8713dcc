use std::net::SocketAddr;

use air_bot::cache::CacheConfig;
use air_bot::command::AirCommand;
use air_bot::gios::{GiosClient, GiosConfig};
use air_bot::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default listen address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Optional override of the GIOŚ endpoint
    let mut gios_config = GiosConfig::default();
    if let Ok(url) = std::env::var("GIOS_BASE_URL") {
        gios_config = gios_config.with_base_url(url);
    }

    let addr: SocketAddr = std::env::var("AIR_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()
        .expect("AIR_BIND must be a socket address");

    let client = GiosClient::new(gios_config).expect("Failed to create GIOŚ client");

    // Station directory is fetched lazily on the first command
    let air = AirCommand::new(client, &CacheConfig::default());
    let app = create_router(AppState::new(air));

    info!(%addr, "air bot listening");
    info!("POST /command  - run a command, e.g. {{\"sender\": \"nick\", \"message\": \"air warszawa\"}}");
    info!("GET  /commands - list commands");
    info!("GET  /health   - health check");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
