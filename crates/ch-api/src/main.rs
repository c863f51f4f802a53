use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ch_api::{AppConfig, AppState, api_router};

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let listen_addr = config.listen_addr;

    let state = AppState::new(config);

    let app = api_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!(addr = %listen_addr, "starting deployment API");

    axum::serve(listener, app).await.expect("server error");
}
