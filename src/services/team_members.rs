//! Client wrappers for team member (employee profile) endpoints.

use uuid::Uuid;

use super::NO_QUERY;
use crate::client::{ApiClient, ServiceError, Upload, path_segment};
use crate::models::{CreateTeamMemberRequest, TeamMember, UpdateTeamMemberRequest};

/// Lists members ordered by the backend; `visible_only` asks for public profiles.
pub async fn list(client: &ApiClient, visible_only: bool) -> Result<Vec<TeamMember>, ServiceError> {
    if visible_only {
        client
            .get_json_with_query("/team-members", &[("visible", "true")])
            .await
    } else {
        client.get_json("/team-members").await
    }
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<TeamMember, ServiceError> {
    client.get_json(&format!("/team-members/{id}")).await
}

pub async fn get_by_slug(client: &ApiClient, slug: &str) -> Result<Option<TeamMember>, ServiceError> {
    client
        .get_optional_json(&format!("/team-members/slug/{}", path_segment(slug)), NO_QUERY)
        .await
}

pub async fn create(
    client: &ApiClient,
    request: &CreateTeamMemberRequest,
) -> Result<TeamMember, ServiceError> {
    client.post_json("/team-members", request).await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateTeamMemberRequest,
) -> Result<TeamMember, ServiceError> {
    client.patch_json(&format!("/team-members/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/team-members/{id}")).await
}

pub async fn upload_photo(client: &ApiClient, id: Uuid, photo: Upload) -> Result<TeamMember, ServiceError> {
    client
        .post_multipart(&format!("/team-members/{id}/photo"), Vec::new(), "photo", photo)
        .await
}
