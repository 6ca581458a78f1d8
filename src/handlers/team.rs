use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::{ensure_image, read_multipart};
use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{CreateTeamMemberRequest, TeamMember, UpdateTeamMemberRequest},
    services::team_members,
    validation::ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/api/admin/team-members",
    responses((status = 200, description = "Team members", body = [TeamMember]))
)]
pub async fn list_members(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(team_members::list(&state.backend(&cookies), false).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/team-members/{id}",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses((status = 200, description = "Member", body = TeamMember))
)]
pub async fn get_member(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, AppError> {
    Ok(Json(team_members::get(&state.backend(&cookies), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/team-members",
    request_body = CreateTeamMemberRequest,
    responses((status = 201, description = "Created", body = TeamMember))
)]
pub async fn create_member(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    let member = team_members::create(&state.backend(&cookies), &payload).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/team-members/{id}",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = UpdateTeamMemberRequest,
    responses((status = 200, description = "Updated", body = TeamMember))
)]
pub async fn update_member(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMember>, AppError> {
    Ok(Json(team_members::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/team-members/{id}",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_member(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    team_members::delete(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// upload_member_photo
///
/// [Admin Route] Profile photo upload; the image travels in the `photo` part.
#[utoipa::path(
    post,
    path = "/api/admin/team-members/{id}/photo",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body(content_type = "multipart/form-data", description = "Profile photo"),
    responses((status = 200, description = "Updated", body = TeamMember))
)]
pub async fn upload_member_photo(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<TeamMember>, AppError> {
    let mut form = read_multipart(multipart, "photo").await?;
    let photo = form.require_file()?;
    ensure_image(&photo)?;
    Ok(Json(team_members::upload_photo(&state.backend(&cookies), id, photo).await?))
}
