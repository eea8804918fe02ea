//! Liveness probe.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Report process liveness.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is running")),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
