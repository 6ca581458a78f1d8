//! Read-only endpoints behind the marketing site, plus the contact form. No cookies are
//! forwarded; the backend serves these without a session. Records the site must not
//! show (inactive funds, drafts, hidden profiles) are reported as 404.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    models::{
        Branch, ContactMessage, ContactMessageRequest, ContactSettings, FaqEntry, Fund,
        FundCategory, FundDetail, FundPrice, FundReport, NewsPost, NewsStatus, Page, TeamMember,
    },
    services::{
        branches, contact,
        fund_prices::{self, PriceQuery},
        fund_reports,
        funds::{self, FundFilter},
        news::{self, NewsQuery},
        team_members,
    },
    validation::{ValidatedJson, validate_slug},
};

const FAQ: &[(&str, &str)] = &[
    (
        "What is a mutual fund?",
        "A mutual fund pools money from many investors and invests it in a portfolio managed by professional fund managers.",
    ),
    (
        "How is the NAV calculated?",
        "The net asset value per unit is the fund's total assets minus liabilities, divided by the number of units outstanding. It is published every business day.",
    ),
    (
        "What is the minimum investment?",
        "Minimum subscription amounts differ per fund and are listed in each fund's prospectus.",
    ),
    (
        "How do I redeem my units?",
        "Submit a redemption request at any branch or through your selling agent. Proceeds are paid at the NAV of the processing date.",
    ),
    (
        "Where can I find fund reports?",
        "Fact sheets, prospectuses and financial statements are available on each fund's page under Reports.",
    ),
];

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PublicFundQuery {
    pub category: Option<FundCategory>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PriceRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Slugs that could never have been issued are answered with 404 without asking the
/// backend.
fn checked_slug<'a>(slug: &'a str, what: &str) -> Result<&'a str, AppError> {
    validate_slug(slug)
        .map(|_| slug)
        .map_err(|_| AppError::not_found(what))
}

/// Resolves a slug to an active fund; inactive funds are not public.
async fn active_fund(state: &AppState, slug: &str) -> Result<Fund, AppError> {
    funds::get_by_slug(&state.api, checked_slug(slug, "Fund")?)
        .await?
        .filter(|fund| fund.is_active)
        .ok_or_else(|| AppError::not_found("Fund"))
}

/// list_funds
///
/// [Public Route] Active funds, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/public/funds",
    operation_id = "public_list_funds",
    params(PublicFundQuery),
    responses((status = 200, description = "Active funds", body = [Fund]))
)]
pub async fn list_funds(
    State(state): State<AppState>,
    Query(query): Query<PublicFundQuery>,
) -> Result<Json<Vec<Fund>>, AppError> {
    let filter = FundFilter {
        category: query.category,
        active: Some(true),
    };
    let mut all = funds::list(&state.api, &filter).await?;
    all.retain(|fund| fund.is_active);
    Ok(Json(all))
}

#[utoipa::path(
    get,
    path = "/api/public/funds/{slug}",
    operation_id = "public_get_fund",
    params(("slug" = String, Path, description = "Fund slug")),
    responses(
        (status = 200, description = "Fund with latest price", body = FundDetail),
        (status = 404, description = "Unknown or inactive fund")
    )
)]
pub async fn get_fund(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<FundDetail>, AppError> {
    let fund = active_fund(&state, &slug).await?;
    let latest_price = fund_prices::latest(&state.api, fund.id).await?;
    Ok(Json(FundDetail { fund, latest_price }))
}

/// get_fund_prices
///
/// [Public Route] NAV history for the fund chart. Date bounds are inclusive.
#[utoipa::path(
    get,
    path = "/api/public/funds/{slug}/prices",
    params(("slug" = String, Path, description = "Fund slug"), PriceRange),
    responses((status = 200, description = "Price history", body = [FundPrice]))
)]
pub async fn get_fund_prices(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(range): Query<PriceRange>,
) -> Result<Json<Vec<FundPrice>>, AppError> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::BadRequest("`from` must not be after `to`".to_string()));
        }
    }

    let fund = active_fund(&state, &slug).await?;
    let query = PriceQuery {
        from: range.from,
        to: range.to,
        ..PriceQuery::for_fund(fund.id)
    };
    Ok(Json(fund_prices::list(&state.api, &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/funds/{slug}/reports",
    params(("slug" = String, Path, description = "Fund slug")),
    responses((status = 200, description = "Published reports", body = [FundReport]))
)]
pub async fn get_fund_reports(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<FundReport>>, AppError> {
    let fund = active_fund(&state, &slug).await?;
    Ok(Json(fund_reports::list(&state.api, Some(fund.id)).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/news",
    operation_id = "public_list_news",
    params(NewsQuery),
    responses((status = 200, description = "Published news", body = Page<NewsPost>))
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Page<NewsPost>>, AppError> {
    Ok(Json(news::list_published(&state.api, &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/news/{slug}",
    operation_id = "public_get_news",
    params(("slug" = String, Path, description = "News slug")),
    responses(
        (status = 200, description = "News post", body = NewsPost),
        (status = 404, description = "Unknown or unpublished post")
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<NewsPost>, AppError> {
    news::get_published_by_slug(&state.api, checked_slug(&slug, "News post")?)
        .await?
        .filter(|post| post.status == NewsStatus::Published)
        .map(Json)
        .ok_or_else(|| AppError::not_found("News post"))
}

/// list_team
///
/// [Public Route] Visible profiles in display order.
#[utoipa::path(
    get,
    path = "/api/public/team",
    responses((status = 200, description = "Team members", body = [TeamMember]))
)]
pub async fn list_team(State(state): State<AppState>) -> Result<Json<Vec<TeamMember>>, AppError> {
    let mut members = team_members::list(&state.api, true).await?;
    members.retain(|member| member.is_visible);
    members.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.full_name.cmp(&b.full_name))
    });
    Ok(Json(members))
}

#[utoipa::path(
    get,
    path = "/api/public/team/{slug}",
    params(("slug" = String, Path, description = "Member slug")),
    responses(
        (status = 200, description = "Team member", body = TeamMember),
        (status = 404, description = "Unknown or hidden profile")
    )
)]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TeamMember>, AppError> {
    team_members::get_by_slug(&state.api, checked_slug(&slug, "Team member")?)
        .await?
        .filter(|member| member.is_visible)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Team member"))
}

/// list_branches
///
/// [Public Route] Head office first, then alphabetical by city and name.
#[utoipa::path(
    get,
    path = "/api/public/branches",
    operation_id = "public_list_branches",
    responses((status = 200, description = "Branches", body = [Branch]))
)]
pub async fn list_branches(State(state): State<AppState>) -> Result<Json<Vec<Branch>>, AppError> {
    let mut all = branches::list(&state.api).await?;
    all.sort_by(|a, b| {
        b.is_head_office
            .cmp(&a.is_head_office)
            .then_with(|| a.city.cmp(&b.city))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(Json(all))
}

#[utoipa::path(
    get,
    path = "/api/public/faq",
    responses((status = 200, description = "Frequently asked questions", body = [FaqEntry]))
)]
pub async fn get_faq() -> Json<Vec<FaqEntry>> {
    Json(
        FAQ.iter()
            .map(|(question, answer)| FaqEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/api/public/contact-settings",
    responses((status = 200, description = "Contact details", body = ContactSettings))
)]
pub async fn get_contact_settings(
    State(state): State<AppState>,
) -> Result<Json<ContactSettings>, AppError> {
    Ok(Json(contact::get_settings(&state.api).await?))
}

/// submit_contact
///
/// [Public Route] "Contact us" form. Validated here before it reaches the inbox.
#[utoipa::path(
    post,
    path = "/api/public/contact",
    request_body = ContactMessageRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessage),
        (status = 422, description = "Invalid form")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactMessageRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let message = contact::submit_message(&state.api, &payload).await?;
    tracing::info!(message_id = %message.id, "contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}
