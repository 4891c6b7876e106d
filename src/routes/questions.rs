use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{
    dto::question_dto::{AnswerPayload, QuestionPayload, QuestionResponse, QuestionUpdateQuery},
    error::Result,
    middleware::auth::Requester,
    AppState,
};

#[utoipa::path(
    get,
    path = "/questions",
    responses(
        (status = 200, description = "Requester's questions", body = Vec<QuestionResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<impl IntoResponse> {
    let questions = state.question_service.list(&requester).await?;
    Ok(Json(
        questions
            .into_iter()
            .map(QuestionResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/questions",
    request_body = QuestionPayload,
    responses(
        (status = 201, description = "Question created", body = Json<QuestionResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    payload: std::result::Result<Json<QuestionPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let question = state
        .question_service
        .create(&requester, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

#[utoipa::path(
    get,
    path = "/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question found", body = Json<QuestionResponse>),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let question = state.question_service.retrieve(&requester, id).await?;
    Ok(Json(QuestionResponse::from(question)))
}

/// With `?answer=true` only the answer is written and the body is
/// `{"answer": ...}`; otherwise the whole question is replaced.
#[utoipa::path(
    put,
    path = "/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID"),
        ("answer" = Option<bool>, Query, description = "Answer-only update")
    ),
    request_body = QuestionPayload,
    responses(
        (status = 204, description = "Question updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn update_question(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
    query: std::result::Result<Query<QuestionUpdateQuery>, QueryRejection>,
    body: std::result::Result<Json<JsonValue>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let Json(body) = body?;
    if query.answer {
        let payload: AnswerPayload = serde_json::from_value(body)?;
        state
            .question_service
            .answer(&requester, id, payload.answer)
            .await?;
    } else {
        let payload: QuestionPayload = serde_json::from_value(body)?;
        payload.validate()?;
        state
            .question_service
            .update(&requester, id, payload.into())
            .await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.question_service.destroy(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
