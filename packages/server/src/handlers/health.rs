use axum::{Json, extract::State};

use crate::database::ping;
use crate::models::health::HealthResponse;
use crate::state::AppState;

/// Liveness and database reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Health check",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if ping(&state.db).await {
        "ok"
    } else {
        "unavailable"
    };
    Json(HealthResponse {
        status: "ok",
        database,
    })
}
