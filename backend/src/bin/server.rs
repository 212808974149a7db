//! Refraction estimator HTTP server binary.
//!
//! Loads the configuration, sets up the router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin refraction-server
//!
//! # Share links pointing at a public hostname behind a proxy
//! PUBLIC_ORIGIN=https://vision.example.com cargo run --bin refraction-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PUBLIC_ORIGIN`: Origin used in share links (default: request `Host`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use refraction_estimator::config::ServerConfig;
use refraction_estimator::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting refraction estimator");

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr()?;
    match &config.public_origin {
        Some(origin) => info!("Share links use {}", origin),
        None => info!("Share links use the request Host header"),
    }

    let app = create_router(AppState::new(config));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
