use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{ClientConfig, ServerConfig};
use crate::guard::{require_session, SessionGuard};

/// Serve the compiled front-end behind the session guard. Unknown paths get
/// `index.html` so client-side routes survive a reload.
pub fn create_router(config: &ServerConfig) -> Router {
    let guard = Arc::new(SessionGuard::from_config(config));
    let index = config.dist_dir.join("index.html");
    let assets = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/config.json", get(client_config))
        .route("/health", get(health))
        .fallback_service(assets)
        .with_state(Arc::new(config.client.clone()))
        .layer(middleware::from_fn_with_state(guard, require_session))
        .layer(TraceLayer::new_for_http())
}

async fn client_config(State(client): State<Arc<ClientConfig>>) -> Json<ClientConfig> {
    Json(client.as_ref().clone())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
