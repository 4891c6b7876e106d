use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::{ApplicationListQuery, ApplicationPayload, ApplicationResponse},
    error::Result,
    middleware::auth::Requester,
    AppState,
};

#[utoipa::path(
    get,
    path = "/applications",
    params(
        ("job_id" = Option<i64>, Query, description = "Only applications for this job")
    ),
    responses(
        (status = 200, description = "Requester's applications", body = Vec<ApplicationResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    query: std::result::Result<Query<ApplicationListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let applications = state
        .application_service
        .list(&requester, query.job_id)
        .await?;
    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/applications",
    request_body = ApplicationPayload,
    responses(
        (status = 201, description = "Application created", body = Json<ApplicationResponse>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    payload: std::result::Result<Json<ApplicationPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let application = state
        .application_service
        .create(&requester, payload.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.retrieve(&requester, id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = ApplicationPayload,
    responses(
        (status = 204, description = "Application replaced"),
        (status = 404, description = "Application or job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<ApplicationPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    state
        .application_service
        .update(&requester, id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.application_service.destroy(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
