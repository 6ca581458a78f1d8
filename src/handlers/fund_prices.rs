use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{CreateFundPriceRequest, FundPrice, UpdateFundPriceRequest},
    services::fund_prices::{self, PriceQuery},
    validation::ValidatedJson,
};

/// list_prices
///
/// [Admin Route] NAV history of one fund, optionally bounded by date.
#[utoipa::path(
    get,
    path = "/api/admin/fund-prices",
    params(PriceQuery),
    responses((status = 200, description = "Prices", body = [FundPrice]))
)]
pub async fn list_prices(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<Vec<FundPrice>>, AppError> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest("`from` must not be after `to`".to_string()));
        }
    }
    Ok(Json(fund_prices::list(&state.backend(&cookies), &query).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/fund-prices",
    request_body = CreateFundPriceRequest,
    responses((status = 201, description = "Created", body = FundPrice))
)]
pub async fn create_price(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFundPriceRequest>,
) -> Result<(StatusCode, Json<FundPrice>), AppError> {
    let price = fund_prices::create(&state.backend(&cookies), &payload).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/fund-prices/{id}",
    params(("id" = Uuid, Path, description = "Price ID")),
    request_body = UpdateFundPriceRequest,
    responses((status = 200, description = "Updated", body = FundPrice))
)]
pub async fn update_price(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFundPriceRequest>,
) -> Result<Json<FundPrice>, AppError> {
    Ok(Json(fund_prices::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/fund-prices/{id}",
    params(("id" = Uuid, Path, description = "Price ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_price(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    fund_prices::delete(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
