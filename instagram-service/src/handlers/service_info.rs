use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_NAME: &str = "Instagram Automation API";

pub async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Service info requested");

    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "endpoints": {
            "/api/process-instagram": "POST - Generate Instagram username, bio and community suggestions"
        }
    }))
}
