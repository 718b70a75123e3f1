use axum::Json;
use serde_json::{json, Value};

use crate::corpus::SOURCES;

/// GET /health
/// Returns a simple status object with service version and corpus size.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "doability-api",
        "curriculum_files": SOURCES.len()
    }))
}
