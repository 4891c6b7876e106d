use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{dto::status_dto::StatusResponse, error::Result, AppState};

#[utoipa::path(
    get,
    path = "/statuses",
    responses(
        (status = 200, description = "All statuses", body = Vec<StatusResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_statuses(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let statuses = state.status_service.list().await?;
    Ok(Json(
        statuses
            .into_iter()
            .map(StatusResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/statuses/{id}",
    params(
        ("id" = i64, Path, description = "Status ID")
    ),
    responses(
        (status = 200, description = "Status found", body = Json<StatusResponse>),
        (status = 404, description = "Status not found")
    )
)]
#[axum::debug_handler]
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let status = state.status_service.retrieve(id).await?;
    Ok(Json(StatusResponse::from(status)))
}
