use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub time: DateTime<Utc>,
}

/// GET /api/health
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        message: "Server is running",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now(),
    })
}
