//! # Zorodoor
//!
//! Landing page backend plus the headless widget core for a scratch-off
//! discount campaign.
//!
//! # How it works
//!
//! - Visitor presses **Get Discount**, fills in name, 10-digit phone, email
//! - Form posts to `POST /api/users`, the record lands in Redis
//! - On success the client draws a discount in [5,75] and shows the scratch
//!   card; scratching past half the overlay reveals it
//! - The displayed discount is generated client-side after the submit and is
//!   deliberately decoupled from anything the server stored
//!
//! The browser owns rendering, animation, and the canvas raster. This crate
//! models their inputs as plain method calls: pointer events drive
//! [`scratch::ScratchCard`], UI actions drive [`flow::LandingFlow`].
//!
//! # Setup
//!
//! Run the server (reads `RUST_PORT` and `REDIS_URL`).
//! ```sh
//! cargo run
//! ```
//!
//! Drive the whole journey against a running server.
//! ```sh
//! cargo run --bin tester
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```

use tokio::{net::TcpListener, signal};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod flow;
pub mod routes;
pub mod scratch;
pub mod state;
pub mod user;

use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");
    let app = routes::app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
