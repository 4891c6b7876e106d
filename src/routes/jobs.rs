use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{JobPayload, JobResponse},
    error::Result,
    middleware::auth::Requester,
    AppState,
};

#[utoipa::path(
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "Requester's jobs", body = Vec<JobResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(&requester).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    post,
    path = "/jobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job created for the requester", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload or unknown status/company")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    payload: std::result::Result<Json<JobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let job = state.job_service.create(&requester, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.retrieve(&requester, id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    put,
    path = "/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = JobPayload,
    responses(
        (status = 204, description = "Job replaced"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<JobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    state
        .job_service
        .update(&requester, id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job and its events deleted"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.destroy(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
