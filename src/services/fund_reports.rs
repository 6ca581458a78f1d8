//! Client wrappers for fund report endpoints. Creation uploads the document as
//! multipart form-data next to its metadata fields.

use uuid::Uuid;

use crate::client::{ApiClient, ServiceError, Upload};
use crate::models::{FundReport, FundReportMetadata, UpdateFundReportRequest};

pub async fn list(client: &ApiClient, fund_id: Option<Uuid>) -> Result<Vec<FundReport>, ServiceError> {
    match fund_id {
        Some(id) => {
            client
                .get_json_with_query("/fund-reports", &[("fund_id", id.to_string())])
                .await
        }
        None => client.get_json("/fund-reports").await,
    }
}

pub async fn get(client: &ApiClient, id: Uuid) -> Result<FundReport, ServiceError> {
    client.get_json(&format!("/fund-reports/{id}")).await
}

/// Builds the multipart body: metadata as text parts, the document as `file`.
pub async fn create(
    client: &ApiClient,
    metadata: &FundReportMetadata,
    file: Upload,
) -> Result<FundReport, ServiceError> {
    let mut fields = vec![
        ("fund_id", metadata.fund_id.to_string()),
        ("title", metadata.title.clone()),
        ("report_type", metadata.report_type.as_str().to_string()),
    ];
    if let Some(period) = &metadata.period {
        fields.push(("period", period.clone()));
    }

    client
        .post_multipart("/fund-reports", fields, "file", file)
        .await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateFundReportRequest,
) -> Result<FundReport, ServiceError> {
    client.patch_json(&format!("/fund-reports/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/fund-reports/{id}")).await
}
