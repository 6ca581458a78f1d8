//! Client wrappers for fund endpoints.

use uuid::Uuid;

use super::NO_QUERY;
use crate::client::{ApiClient, ServiceError, path_segment};
use crate::models::{CreateFundRequest, Fund, FundCategory, UpdateFundRequest};

/// Filters accepted by `GET /funds`.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FundFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FundCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

pub async fn list(client: &ApiClient, filter: &FundFilter) -> Result<Vec<Fund>, ServiceError> {
    client.get_json_with_query("/funds", filter).await
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<Fund, ServiceError> {
    client.get_json(&format!("/funds/{id}")).await
}

/// Looks a fund up by its public slug; `None` when the backend has no such fund.
pub async fn get_by_slug(client: &ApiClient, slug: &str) -> Result<Option<Fund>, ServiceError> {
    client
        .get_optional_json(&format!("/funds/slug/{}", path_segment(slug)), NO_QUERY)
        .await
}

pub async fn create(client: &ApiClient, request: &CreateFundRequest) -> Result<Fund, ServiceError> {
    client.post_json("/funds", request).await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateFundRequest,
) -> Result<Fund, ServiceError> {
    client.patch_json(&format!("/funds/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/funds/{id}")).await
}
