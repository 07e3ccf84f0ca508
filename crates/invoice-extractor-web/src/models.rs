use serde::{Deserialize, Serialize};

pub const HEALTH_MESSAGE: &str = "Invoice extractor backend is running.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Body of every error response. The frontend reads `detail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
