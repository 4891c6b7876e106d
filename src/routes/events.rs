use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::event_dto::{EventListQuery, EventPayload, EventResponse},
    error::Result,
    middleware::auth::Requester,
    AppState,
};

#[utoipa::path(
    get,
    path = "/events",
    params(
        ("job_id" = Option<i64>, Query, description = "Only events of this job")
    ),
    responses(
        (status = 200, description = "Requester's events by start time", body = Vec<EventResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_events(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    query: std::result::Result<Query<EventListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let events = state.event_service.list(&requester, query.job_id).await?;
    Ok(Json(
        events
            .into_iter()
            .map(EventResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event created", body = Json<EventResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    payload: std::result::Result<Json<EventPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let event = state
        .event_service
        .create(&requester, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Json<EventResponse>),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn get_event(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let event = state.event_service.retrieve(&requester, id).await?;
    Ok(Json(EventResponse::from(event)))
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = EventPayload,
    responses(
        (status = 204, description = "Event replaced"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Event or job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<EventPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    state
        .event_service
        .update(&requester, id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.event_service.destroy(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
