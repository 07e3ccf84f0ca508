use axum::Json;

use crate::models::{HEALTH_MESSAGE, HealthResponse};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}
