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
    models::{ContactMessage, ContactSettings, MarkMessageReadRequest, UpdateContactSettingsRequest},
    services::contact,
    validation::ValidatedJson,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InboxQuery {
    /// Only messages not yet marked as read.
    #[serde(default)]
    pub unread: bool,
}

/// list_messages
///
/// [Admin Route] Contact form inbox.
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages",
    params(InboxQuery),
    responses((status = 200, description = "Messages", body = [ContactMessage]))
)]
pub async fn list_messages(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    Ok(Json(contact::list_messages(&state.backend(&cookies), query.unread).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/contact-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses((status = 200, description = "Message", body = ContactMessage))
)]
pub async fn get_message(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(contact::get_message(&state.backend(&cookies), id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/admin/contact-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = MarkMessageReadRequest,
    responses((status = 200, description = "Updated", body = ContactMessage))
)]
pub async fn mark_message_read(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkMessageReadRequest>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(
        contact::mark_read(&state.backend(&cookies), id, payload.is_read).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/contact-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_message(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    contact::delete_message(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/contact-settings",
    responses((status = 200, description = "Settings", body = ContactSettings))
)]
pub async fn get_settings(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
) -> Result<Json<ContactSettings>, AppError> {
    Ok(Json(contact::get_settings(&state.backend(&cookies)).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/contact-settings",
    request_body = UpdateContactSettingsRequest,
    responses((status = 200, description = "Updated", body = ContactSettings))
)]
pub async fn update_settings(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateContactSettingsRequest>,
) -> Result<Json<ContactSettings>, AppError> {
    Ok(Json(contact::update_settings(&state.backend(&cookies), &payload).await?))
}
