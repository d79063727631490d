use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::forecast;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/forecast/baseline", get(forecast::baseline))
        .route("/forecast/scenario", post(forecast::scenario))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
