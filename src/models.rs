use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{
    validate_currency, validate_fund_code, validate_latitude, validate_longitude,
    validate_not_blank, validate_percentage, validate_phone, validate_positive, validate_slug,
};

// --- Records mirrored from the backend API ---

/// FundCategory
///
/// Closed set of fund categories. Unknown values are rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FundCategory {
    #[default]
    Equity,
    FixedIncome,
    MoneyMarket,
    Balanced,
    Islamic,
    Index,
}

/// Fund
///
/// A collective investment fund as returned by `GET /funds`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Fund {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub code: String,
    pub category: FundCategory,
    // 1 (lowest) to 7 (highest), the usual SRRI scale.
    pub risk_level: u8,
    pub currency: String,
    pub description: Option<String>,
    pub inception_date: Option<NaiveDate>,
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub management_fee: Option<Decimal>,
    pub is_active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// FundPrice
///
/// One NAV observation for a fund. Bid/offer are only published for some funds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct FundPrice {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub price_date: NaiveDate,
    #[ts(type = "string")]
    #[schema(value_type = String)]
    pub nav: Decimal,
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub bid: Option<Decimal>,
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub offer: Option<Decimal>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportType {
    #[default]
    Factsheet,
    Monthly,
    Quarterly,
    Annual,
    Prospectus,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Factsheet => "factsheet",
            ReportType::Monthly => "monthly",
            ReportType::Quarterly => "quarterly",
            ReportType::Annual => "annual",
            ReportType::Prospectus => "prospectus",
        }
    }
}

/// FundReport
///
/// A downloadable document attached to a fund. `file_url` points at the backend's
/// file storage.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct FundReport {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub title: String,
    pub report_type: ReportType,
    pub period: Option<String>,
    pub file_url: String,
    #[ts(type = "string | null")]
    pub published_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NewsStatus {
    #[default]
    Draft,
    Published,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "draft",
            NewsStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NewsPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub status: NewsStatus,
    #[ts(type = "string | null")]
    pub published_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// TeamMember
///
/// An employee profile. Only `is_visible` members appear on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TeamMember {
    pub id: Uuid,
    pub full_name: String,
    pub slug: String,
    pub position: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub display_order: i32,
    pub is_visible: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_head_office: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContactMessage {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// ContactSettings
///
/// Singleton record holding the firm's public contact details.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContactSettings {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: Option<String>,
    pub map_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub x_url: Option<String>,
}

/// Page
///
/// Envelope for paginated backend listings.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

// --- Request Payloads (validated forms) ---

/// CreateFundRequest
///
/// Dashboard "new fund" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct CreateFundRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 200), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, max = 20), custom(function = "validate_fund_code"))]
    pub code: String,
    pub category: FundCategory,
    #[validate(range(min = 1, max = 7))]
    pub risk_level: u8,
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
    #[validate(length(max = 5000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inception_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_percentage"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub management_fee: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// UpdateFundRequest
///
/// Partial update; absent fields are left out of the PATCH body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateFundRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200), custom(function = "validate_slug"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 20), custom(function = "validate_fund_code"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FundCategory>,
    #[validate(range(min = 1, max = 7))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<u8>,
    #[validate(custom(function = "validate_currency"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inception_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_percentage"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub management_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct CreateFundPriceRequest {
    pub fund_id: Uuid,
    pub price_date: NaiveDate,
    #[validate(custom(function = "validate_positive"))]
    #[ts(type = "string")]
    #[schema(value_type = String)]
    pub nav: Decimal,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub bid: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub offer: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateFundPriceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub nav: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub bid: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub offer: Option<Decimal>,
}

/// FundReportMetadata
///
/// Text fields of the multipart "upload report" form. The file part travels
/// separately as an `Upload`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct FundReportMetadata {
    pub fund_id: Uuid,
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    pub report_type: ReportType,
    #[validate(length(max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateFundReportRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<ReportType>,
    #[validate(length(max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, max = 250), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 250), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub body: String,
    #[serde(default)]
    pub status: NewsStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 250), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 250), custom(function = "validate_slug"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NewsStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub position: String,
    #[validate(length(max = 150))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 150), custom(function = "validate_slug"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[validate(length(max = 150))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct CreateBranchRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub city: String,
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(length(min = 7, max = 20), custom(function = "validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(custom(function = "validate_latitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[validate(custom(function = "validate_longitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_head_office: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct UpdateBranchRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(length(min = 7, max = 20), custom(function = "validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(custom(function = "validate_latitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[validate(custom(function = "validate_longitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_head_office: Option<bool>,
}

/// ContactMessageRequest
///
/// Public "contact us" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct ContactMessageRequest {
    #[validate(length(min = 2, max = 100), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 20), custom(function = "validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 2, max = 150), custom(function = "validate_not_blank"))]
    pub subject: String,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MarkMessageReadRequest {
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct UpdateContactSettingsRequest {
    #[validate(length(min = 7, max = 20), custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_url: Option<String>,
}

// --- Auth payloads ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// SignUpRequest
///
/// The password is passed through to the auth service and never logged or stored here.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[ts(export)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Session
///
/// Active session as reported by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Session {
    pub user: SessionUser,
    #[ts(type = "string | null")]
    pub expires_at: Option<DateTime<Utc>>,
}

// --- Public site ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// FundDetail
///
/// Public fund page: the fund plus its most recent price.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FundDetail {
    pub fund: Fund,
    pub latest_price: Option<FundPrice>,
}

/// DashboardOverview
///
/// Counters shown on the admin dashboard landing page (GET /api/admin/overview).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardOverview {
    pub total_funds: u64,
    pub active_funds: u64,
    pub published_news: u64,
    pub visible_team_members: u64,
    pub branches: u64,
    pub unread_messages: u64,
}
