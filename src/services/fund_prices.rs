//! Client wrappers for fund price (NAV) endpoints.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::client::{ApiClient, ServiceError};
use crate::models::{CreateFundPriceRequest, FundPrice, UpdateFundPriceRequest};

/// Query for `GET /funds/prices`. Date bounds are inclusive.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, utoipa::IntoParams)]
pub struct PriceQuery {
    pub fund_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl PriceQuery {
    pub fn for_fund(fund_id: Uuid) -> Self {
        Self {
            fund_id,
            from: None,
            to: None,
        }
    }
}

pub async fn list(client: &ApiClient, query: &PriceQuery) -> Result<Vec<FundPrice>, ServiceError> {
    client.get_json_with_query("/funds/prices", query).await
}

/// Most recent price of a fund, `None` before the first NAV is published.
pub async fn latest(client: &ApiClient, fund_id: Uuid) -> Result<Option<FundPrice>, ServiceError> {
    client
        .get_optional_json("/funds/prices/latest", &[("fund_id", fund_id.to_string())])
        .await
}

pub async fn create(
    client: &ApiClient,
    request: &CreateFundPriceRequest,
) -> Result<FundPrice, ServiceError> {
    client.post_json("/funds/prices", request).await
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    request: &UpdateFundPriceRequest,
) -> Result<FundPrice, ServiceError> {
    client.patch_json(&format!("/funds/prices/{id}"), request).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<(), ServiceError> {
    client.delete(&format!("/funds/prices/{id}")).await
}
