use axum::{Json, extract::State};

use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{DashboardOverview, NewsStatus},
    services::{
        branches, contact,
        funds::{self, FundFilter},
        news::{self, NewsQuery},
        team_members,
    },
};

/// get_overview
///
/// [Admin Route] Counters for the dashboard landing page. The five backend calls are
/// independent and issued concurrently; the first failure fails the whole overview.
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses((status = 200, description = "Dashboard counters", body = DashboardOverview))
)]
pub async fn get_overview(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, AppError> {
    let client = state.backend(&cookies);
    let all = FundFilter::default();
    let published = NewsQuery {
        page: 1,
        per_page: 1,
        status: Some(NewsStatus::Published),
    };

    let (all_funds, news_page, members, all_branches, unread) = tokio::join!(
        funds::list(&client, &all),
        news::list(&client, &published),
        team_members::list(&client, false),
        branches::list(&client),
        contact::list_messages(&client, true),
    );

    let all_funds = all_funds?;
    Ok(Json(DashboardOverview {
        total_funds: all_funds.len() as u64,
        active_funds: all_funds.iter().filter(|f| f.is_active).count() as u64,
        published_news: news_page?.total,
        visible_team_members: members?.iter().filter(|m| m.is_visible).count() as u64,
        branches: all_branches?.len() as u64,
        unread_messages: unread?.iter().filter(|m| !m.is_read).count() as u64,
    }))
}
