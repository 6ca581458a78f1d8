use crate::{
    AppState,
    handlers::{self, branches, contact, dashboard, fund_prices, fund_reports, funds, news, team},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

/// Admin Router Module
///
/// Dashboard endpoints, mounted under `/api/admin`.
///
/// Access Control:
/// The route guard redirects requests without a session cookie to `/login` before
/// they reach this router. Everything past that point (is the session valid, may this
/// user edit funds) is decided by the backend, which receives the caller's cookies.
pub fn admin_routes() -> Router<AppState> {
    // Uploads carry PDFs and images; the default 2 MB body limit is too small.
    let uploads = DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES);

    Router::new()
        // GET /overview
        // Counters for the dashboard landing page.
        .route("/overview", get(dashboard::get_overview))
        // --- Funds ---
        .route("/funds", get(funds::list_funds).post(funds::create_fund))
        .route(
            "/funds/{id}",
            get(funds::get_fund)
                .patch(funds::update_fund)
                .delete(funds::delete_fund),
        )
        // --- Prices (NAV) ---
        .route(
            "/fund-prices",
            get(fund_prices::list_prices).post(fund_prices::create_price),
        )
        .route(
            "/fund-prices/{id}",
            patch(fund_prices::update_price).delete(fund_prices::delete_price),
        )
        // --- Reports ---
        // POST /fund-reports takes multipart: metadata fields plus the PDF as `file`.
        .route(
            "/fund-reports",
            get(fund_reports::list_reports)
                .post(fund_reports::create_report)
                .layer(uploads.clone()),
        )
        .route(
            "/fund-reports/{id}",
            get(fund_reports::get_report)
                .patch(fund_reports::update_report)
                .delete(fund_reports::delete_report),
        )
        // --- News ---
        .route("/news", get(news::list_news).post(news::create_news))
        .route(
            "/news/{id}",
            get(news::get_news)
                .patch(news::update_news)
                .delete(news::delete_news),
        )
        .route(
            "/news/{id}/cover",
            post(news::upload_news_cover).layer(uploads.clone()),
        )
        // --- Team ---
        .route(
            "/team-members",
            get(team::list_members).post(team::create_member),
        )
        .route(
            "/team-members/{id}",
            get(team::get_member)
                .patch(team::update_member)
                .delete(team::delete_member),
        )
        .route(
            "/team-members/{id}/photo",
            post(team::upload_member_photo).layer(uploads),
        )
        // --- Branches ---
        .route(
            "/branches",
            get(branches::list_branches).post(branches::create_branch),
        )
        .route(
            "/branches/{id}",
            get(branches::get_branch)
                .patch(branches::update_branch)
                .delete(branches::delete_branch),
        )
        // --- Contact ---
        .route("/contact-messages", get(contact::list_messages))
        .route(
            "/contact-messages/{id}",
            get(contact::get_message)
                .patch(contact::mark_message_read)
                .delete(contact::delete_message),
        )
        .route(
            "/contact-settings",
            get(contact::get_settings).put(contact::update_settings),
        )
}
