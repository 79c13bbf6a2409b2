//! Second Brain Service — standalone binary for capturing and listing memories.
//!
//! Hosts the JSON API and a dashboard page on the same port.
//! Default: http://127.0.0.1:9103/

mod config;
mod dashboard;
mod routes;
mod store;

use routes::AppState;
use std::sync::Arc;
use std::time::Instant;
use store::{MemoryStore, PostgrestTable};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            eprintln!("second-brain-service: {}", e);
            std::process::exit(1);
        }
    };

    let store = MemoryStore::new(Arc::new(PostgrestTable::from_config(&config)));
    log::info!("Using memories table at: {}", store.describe());

    let state = Arc::new(AppState {
        store,
        start_time: Instant::now(),
    });

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::router(state).layer(cors);

    let addr = format!("127.0.0.1:{}", config.port);
    log::info!("Second Brain Service listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
