use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::{ensure_image, read_multipart};
use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{CreateNewsRequest, NewsPost, Page, UpdateNewsRequest},
    services::news::{self, NewsQuery},
    validation::ValidatedJson,
};

/// list_news
///
/// [Admin Route] Drafts and published posts, paginated.
#[utoipa::path(
    get,
    path = "/api/admin/news",
    params(NewsQuery),
    responses((status = 200, description = "News page", body = Page<NewsPost>))
)]
pub async fn list_news(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Page<NewsPost>>, AppError> {
    Ok(Json(news::list(&state.backend(&cookies), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "News post", body = NewsPost))
)]
pub async fn get_news(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsPost>, AppError> {
    Ok(Json(news::get(&state.backend(&cookies), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/news",
    request_body = CreateNewsRequest,
    responses((status = 201, description = "Created", body = NewsPost))
)]
pub async fn create_news(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsPost>), AppError> {
    let post = news::create(&state.backend(&cookies), &payload).await?;
    tracing::info!(news_id = %post.id, status = post.status.as_str(), "news post created");
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body = UpdateNewsRequest,
    responses((status = 200, description = "Updated", body = NewsPost))
)]
pub async fn update_news(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNewsRequest>,
) -> Result<Json<NewsPost>, AppError> {
    Ok(Json(news::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_news(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    news::delete(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// upload_news_cover
///
/// [Admin Route] Replaces the cover image; the image travels in the `image` part.
#[utoipa::path(
    post,
    path = "/api/admin/news/{id}/cover",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body(content_type = "multipart/form-data", description = "Cover image"),
    responses((status = 200, description = "Updated", body = NewsPost))
)]
pub async fn upload_news_cover(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<NewsPost>, AppError> {
    let mut form = read_multipart(multipart, "image").await?;
    let image = form.require_file()?;
    ensure_image(&image)?;
    Ok(Json(news::upload_cover(&state.backend(&cookies), id, image).await?))
}
