use axum::extract::State;
use axum::Json;

use santia_core::models::status_check::{StatusCheck, StatusCheckCreate};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn create_status_check(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = state.intake.submit_status(input).await?;
    Ok(Json(check))
}

pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.intake.list_statuses().await?;
    Ok(Json(checks))
}
