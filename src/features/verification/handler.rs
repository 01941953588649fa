use axum::Json;
use axum::extract::State;

use crate::core::error::AppError;
use crate::features::verification::dto::{VerificationResultDto, VerifyRequestDto};
use crate::server::AppState;

pub async fn handle_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequestDto>,
) -> Result<Json<VerificationResultDto>, AppError> {
    let result = state.service.verify(request).await?;
    Ok(Json(result))
}
