use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{Branch, CreateBranchRequest, UpdateBranchRequest},
    services::branches,
    validation::ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/api/admin/branches",
    responses((status = 200, description = "Branches", body = [Branch]))
)]
pub async fn list_branches(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
) -> Result<Json<Vec<Branch>>, AppError> {
    Ok(Json(branches::list(&state.backend(&cookies)).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses((status = 200, description = "Branch", body = Branch))
)]
pub async fn get_branch(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Branch>, AppError> {
    Ok(Json(branches::get(&state.backend(&cookies), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/branches",
    request_body = CreateBranchRequest,
    responses((status = 201, description = "Created", body = Branch))
)]
pub async fn create_branch(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBranchRequest>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    let branch = branches::create(&state.backend(&cookies), &payload).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    request_body = UpdateBranchRequest,
    responses((status = 200, description = "Updated", body = Branch))
)]
pub async fn update_branch(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBranchRequest>,
) -> Result<Json<Branch>, AppError> {
    Ok(Json(branches::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_branch(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    branches::delete(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
