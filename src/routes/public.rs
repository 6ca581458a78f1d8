use crate::{AppState, handlers::public};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints consumed by the marketing site. Mounted under `/api/public`, which the
/// route guard always lets through, so none of these handlers forward cookies.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // --- Funds ---
        .route("/funds", get(public::list_funds))
        .route("/funds/{slug}", get(public::get_fund))
        // NAV history for the fund chart; optional inclusive `from`/`to` dates.
        .route("/funds/{slug}/prices", get(public::get_fund_prices))
        .route("/funds/{slug}/reports", get(public::get_fund_reports))
        // --- News ---
        .route("/news", get(public::list_news))
        .route("/news/{slug}", get(public::get_news))
        // --- Team ---
        .route("/team", get(public::list_team))
        .route("/team/{slug}", get(public::get_team_member))
        // --- Company ---
        .route("/branches", get(public::list_branches))
        .route("/faq", get(public::get_faq))
        .route("/contact-settings", get(public::get_contact_settings))
        // POST /contact
        // "Contact us" form; validated before it is forwarded to the inbox.
        .route("/contact", post(public::submit_contact))
}
