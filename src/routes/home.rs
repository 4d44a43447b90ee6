//! Landing route.

use axum::response::IntoResponse;
use axum::Json;

/// GET /
pub async fn welcome() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to MoviWeb",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
