use std::sync::Arc;

use axum::extract::State;
use courtside_core::models::sport::Sport;

use crate::{
    middleware::error_handling::{AppError, ErrorResponse},
    response::ApiResponse,
    ApiState,
};

/// All sports, ordered by name.
#[utoipa::path(
    get,
    path = "/sports",
    tag = "catalogue",
    responses(
        (status = 200, description = "Sports in the `data` field of the success envelope", body = [Sport]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn list_sports(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<Vec<Sport>>, AppError> {
    let sports = courtside_db::repositories::sport::list_sports(&state.db_pool)
        .await?
        .into_iter()
        .map(Sport::from)
        .collect();

    Ok(ApiResponse::success(sports))
}
