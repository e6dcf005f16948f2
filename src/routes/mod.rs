//! HTTP route handlers for the SpeicherBaum API.
//!
//! Handlers only extract input, call [`crate::tree::TreeStore`] and record
//! metrics; all tree semantics live in [`crate::tree`].
//!
//! - `imports`: bulk upsert of files and folders
//! - `nodes`: node lookup and cascading deletion
//! - `updates`: 24-hour change feed
//! - `children`: listing by `home/...` path
//! - `health`: liveness, readiness, metrics and version

pub mod children;
pub mod health;
pub mod imports;
pub mod nodes;
pub mod updates;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::{middleware::validation::body_limit_middleware, state::AppState};

/// Builds the API router with its body-size guards applied.
pub fn router(state: AppState) -> Router {
    let cfg = state.config.clone();
    let max_body = cfg.http.max_body_bytes;

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/imports", post(imports::import_items))
        .route("/delete/{id}", delete(nodes::delete_node))
        .route("/nodes/{id}", get(nodes::get_node))
        .route("/updates", get(updates::get_updates))
        .route("/children", get(children::list_children))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(from_fn_with_state(cfg, body_limit_middleware))
}
