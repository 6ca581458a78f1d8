use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{CreateFundRequest, Fund, FundCategory, UpdateFundRequest},
    services::funds::{self, FundFilter},
    validation::ValidatedJson,
};

/// FundListQuery
///
/// Query parameters of the dashboard fund table.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct FundListQuery {
    /// Restrict to one category.
    pub category: Option<FundCategory>,
    /// `true` for active funds only, `false` for inactive only.
    pub active: Option<bool>,
}

/// list_funds
///
/// [Admin Route] All funds, active or not.
#[utoipa::path(
    get,
    path = "/api/admin/funds",
    params(FundListQuery),
    responses((status = 200, description = "Funds", body = [Fund]))
)]
pub async fn list_funds(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Query(query): Query<FundListQuery>,
) -> Result<Json<Vec<Fund>>, AppError> {
    let filter = FundFilter {
        category: query.category,
        active: query.active,
    };
    Ok(Json(funds::list(&state.backend(&cookies), &filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/funds/{id}",
    params(("id" = Uuid, Path, description = "Fund ID")),
    responses(
        (status = 200, description = "Fund", body = Fund),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_fund(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Fund>, AppError> {
    Ok(Json(funds::get(&state.backend(&cookies), id).await?))
}

/// create_fund
///
/// [Admin Route] Validates the "new fund" form before forwarding it.
#[utoipa::path(
    post,
    path = "/api/admin/funds",
    request_body = CreateFundRequest,
    responses(
        (status = 201, description = "Created", body = Fund),
        (status = 422, description = "Invalid form")
    )
)]
pub async fn create_fund(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFundRequest>,
) -> Result<(StatusCode, Json<Fund>), AppError> {
    let fund = funds::create(&state.backend(&cookies), &payload).await?;
    tracing::info!(fund_id = %fund.id, code = %fund.code, "fund created");
    Ok((StatusCode::CREATED, Json(fund)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/funds/{id}",
    params(("id" = Uuid, Path, description = "Fund ID")),
    request_body = UpdateFundRequest,
    responses((status = 200, description = "Updated", body = Fund))
)]
pub async fn update_fund(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFundRequest>,
) -> Result<Json<Fund>, AppError> {
    Ok(Json(funds::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/funds/{id}",
    params(("id" = Uuid, Path, description = "Fund ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_fund(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    funds::delete(&state.backend(&cookies), id).await?;
    tracing::info!(fund_id = %id, "fund deleted");
    Ok(StatusCode::NO_CONTENT)
}
