//! Client wrappers for contact messages (inbox) and the contact settings singleton.

use uuid::Uuid;

use crate::client::{ApiClient, ServiceError};
use crate::models::{
    ContactMessage, ContactMessageRequest, ContactSettings, MarkMessageReadRequest,
    UpdateContactSettingsRequest,
};

pub async fn list_messages(client: &ApiClient, unread_only: bool) -> Result<Vec<ContactMessage>, ServiceError> {
    if unread_only {
        client
            .get_json_with_query("/contact-messages", &[("unread", "true")])
            .await
    } else {
        client.get_json("/contact-messages").await
    }
}

pub async fn get_message(client: &ApiClient, id: Uuid) -> Result<ContactMessage, ServiceError> {
    client.get_json(&format!("/contact-messages/{id}")).await
}

/// Public form submission.
pub async fn submit_message(
    client: &ApiClient,
    request: &ContactMessageRequest,
) -> Result<ContactMessage, ServiceError> {
    client.post_json("/contact-messages", request).await
}

pub async fn mark_read(client: &ApiClient, id: Uuid, is_read: bool) -> Result<ContactMessage, ServiceError> {
    client
        .patch_json(
            &format!("/contact-messages/{id}"),
            &MarkMessageReadRequest { is_read },
        )
        .await
}

pub async fn delete_message(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/contact-messages/{id}")).await
}

pub async fn get_settings(client: &ApiClient) -> Result<ContactSettings, ServiceError> {
    client.get_json("/contact-settings").await
}

pub async fn update_settings(
    client: &ApiClient,
    request: &UpdateContactSettingsRequest,
) -> Result<ContactSettings, ServiceError> {
    client.put_json("/contact-settings", request).await
}
