//! Client wrappers for news endpoints. Public reads go through `/news`, which only
//! ever returns published posts; the dashboard uses `/admin/news`.

use uuid::Uuid;

use super::NO_QUERY;
use crate::client::{ApiClient, ServiceError, Upload, path_segment};
use crate::models::{CreateNewsRequest, NewsPost, NewsStatus, Page, UpdateNewsRequest};

pub const DEFAULT_PER_PAGE: u32 = 12;
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination and filter query shared by the public and admin listings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, utoipa::IntoParams)]
pub struct NewsQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NewsStatus>,
}

fn first_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            per_page: default_per_page(),
            status: None,
        }
    }
}

impl NewsQuery {
    /// Clamps page to >= 1 and per_page to 1..=MAX_PER_PAGE.
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            status: self.status,
        }
    }
}

pub async fn list_published(client: &ApiClient, query: &NewsQuery) -> Result<Page<NewsPost>, ServiceError> {
    let query = NewsQuery {
        status: None,
        ..query.normalized()
    };
    client.get_json_with_query("/news", &query).await
}

pub async fn get_published_by_slug(
    client: &ApiClient,
    slug: &str,
) -> Result<Option<NewsPost>, ServiceError> {
    client
        .get_optional_json(&format!("/news/slug/{}", path_segment(slug)), NO_QUERY)
        .await
}

pub async fn list(client: &ApiClient, query: &NewsQuery) -> Result<Page<NewsPost>, ServiceError> {
    client
        .get_json_with_query("/admin/news", &query.normalized())
        .await
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<NewsPost, ServiceError> {
    client.get_json(&format!("/admin/news/{id}")).await
}

pub async fn create(client: &ApiClient, request: &CreateNewsRequest) -> Result<NewsPost, ServiceError> {
    client.post_json("/admin/news", request).await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateNewsRequest,
) -> Result<NewsPost, ServiceError> {
    client.patch_json(&format!("/admin/news/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/admin/news/{id}")).await
}

pub async fn upload_cover(client: &ApiClient, id: Uuid, image: Upload) -> Result<NewsPost, ServiceError> {
    client
        .post_multipart(&format!("/admin/news/{id}/cover"), Vec::new(), "image", image)
        .await
}
