use serde_json::{json, Value};

use crate::middleware::ApiResponse;

/// GET /api/health
pub async fn health() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}
