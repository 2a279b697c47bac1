use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthMessage {
    pub message: &'static str,
}

pub async fn health_check() -> Json<HealthMessage> {
    Json(HealthMessage {
        message: "Hello World",
    })
}
