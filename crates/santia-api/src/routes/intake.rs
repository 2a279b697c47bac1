use axum::extract::State;
use axum::Json;

use santia_core::models::intake::{IntakeCreate, IntakeRecord};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Record a consultation request. Rejected with 400 when consent is
/// missing, 422 when the body does not match [`IntakeCreate`].
pub async fn create_intake(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<IntakeCreate>,
) -> Result<Json<IntakeRecord>, ApiError> {
    let record = state.intake.submit_intake(input).await?;
    Ok(Json(record))
}

pub async fn list_intakes(
    State(state): State<AppState>,
) -> Result<Json<Vec<IntakeRecord>>, ApiError> {
    let intakes = state.intake.list_intakes().await?;
    Ok(Json(intakes))
}
