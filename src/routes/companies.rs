use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::company_dto::{CompanyPayload, CompanyResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/companies",
    responses(
        (status = 200, description = "All companies ordered by name", body = Vec<CompanyResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let companies = state.company_service.list().await?;
    Ok(Json(
        companies
            .into_iter()
            .map(CompanyResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/companies",
    request_body = CompanyPayload,
    responses(
        (status = 201, description = "Company created", body = Json<CompanyResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let company = state.company_service.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse::from(company))))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(
        ("id" = i64, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company found", body = Json<CompanyResponse>),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.retrieve(id).await?;
    Ok(Json(CompanyResponse::from(company)))
}

#[utoipa::path(
    put,
    path = "/companies/{id}",
    params(
        ("id" = i64, Path, description = "Company ID")
    ),
    request_body = CompanyPayload,
    responses(
        (status = 204, description = "Company updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    state.company_service.update(id, &payload.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(
        ("id" = i64, Path, description = "Company ID")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Company is still referenced by a job")
    )
)]
#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.company_service.destroy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
