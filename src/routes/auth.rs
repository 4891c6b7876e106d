use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{
        CandidateProfileResponse, LoginPayload, LoginResponse, RegisterPayload, TokenResponse,
    },
    error::{Error, Result},
    middleware::auth::Requester,
    services::auth_service::LoginOutcome,
    AppState,
};

fn registration_rejected(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "valid": false, "error": message })),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterPayload,
    responses(
        (status = 200, description = "Account created", body = Json<TokenResponse>),
        (status = 400, description = "Invalid payload or email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Ok(registration_rejected(rejection.body_text())),
    };
    if let Err(err) = payload.validate() {
        return Ok(registration_rejected(err.to_string()));
    }

    match state.auth_service.register(payload).await {
        Ok(token) => Ok(Json(TokenResponse { token }).into_response()),
        Err(Error::BadRequest(message)) => Ok(registration_rejected(message)),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login outcome; token present only when valid", body = Json<LoginResponse>)
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let response = match state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?
    {
        LoginOutcome::Valid { token } => LoginResponse {
            valid: true,
            token: Some(token),
        },
        LoginOutcome::Invalid => LoginResponse {
            valid: false,
            token: None,
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api-token-auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token for the credentials", body = Json<TokenResponse>),
        (status = 400, description = "Unable to log in with provided credentials")
    )
)]
#[axum::debug_handler]
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    match state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?
    {
        LoginOutcome::Valid { token } => Ok(Json(TokenResponse { token })),
        LoginOutcome::Invalid => Err(Error::BadRequest(
            "Unable to log in with provided credentials.".to_string(),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/candidates/me",
    responses(
        (status = 200, description = "Requester's candidate profile", body = Json<CandidateProfileResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<impl IntoResponse> {
    let profile = state.auth_service.profile(&requester).await?;
    Ok(Json(CandidateProfileResponse::from(profile)))
}
