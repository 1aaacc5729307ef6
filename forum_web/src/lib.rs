//! HTTP front end for the forum.
//!
//! Handlers run their database work on a blocking worker with a
//! connection from an r2d2 pool and answer with server-rendered HTML or
//! a `303 See Other` redirect. Validation failures re-render the form
//! with status 422.

use axum::Router;
use forum_core::db::ConnectionSpec;
use log::{error, info};

pub mod config;
pub mod error;
mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

/// The application router over `state`.
pub fn create_app(state: AppState) -> Router {
    routes::router(state.config().fake_auth).with_state(state)
}

/// Serve `config` until interrupted.
pub async fn start_server(config: Config) -> Result<(), AppError> {
    let spec = ConnectionSpec::load(&config.connection)?;
    let addr = config.addr();
    let state = AppState::connect(spec, config)?;
    if state.config().fake_auth {
        info!("/auth/fake is enabled");
    }
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
