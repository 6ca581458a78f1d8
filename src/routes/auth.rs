use crate::{AppState, handlers::auth};
use axum::{
    Router,
    routing::{get, post},
};

/// Auth Router Module
///
/// Mounted under `/api/auth` (a guard bypass prefix: the login page must be able to
/// call these without a session).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-out", post(auth::sign_out))
        .route("/session", get(auth::get_session))
}
