//! Client wrappers for branch endpoints.

use uuid::Uuid;

use crate::client::{ApiClient, ServiceError};
use crate::models::{Branch, CreateBranchRequest, UpdateBranchRequest};

pub async fn list(client: &ApiClient) -> Result<Vec<Branch>, ServiceError> {
    client.get_json("/branches").await
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<Branch, ServiceError> {
    client.get_json(&format!("/branches/{id}")).await
}

pub async fn create(client: &ApiClient, request: &CreateBranchRequest) -> Result<Branch, ServiceError> {
    client.post_json("/branches", request).await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateBranchRequest,
) -> Result<Branch, ServiceError> {
    client.patch_json(&format!("/branches/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/branches/{id}")).await
}
