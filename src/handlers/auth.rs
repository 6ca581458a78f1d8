//! Sign-in/up/out relays. The auth service owns the session; these handlers validate
//! the form, forward it, and copy its `Set-Cookie` headers onto the browser response.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    auth::AuthOutcome,
    client::ForwardedCookies,
    config::SECURE_COOKIE_PREFIX,
    error::AppError,
    models::{Session, SessionUser, SignInRequest, SignUpRequest},
    validation::ValidatedJson,
};

fn with_cookies(status: StatusCode, set_cookies: Vec<HeaderValue>, body: impl IntoResponse) -> Response {
    let mut headers = HeaderMap::new();
    for cookie in set_cookies {
        headers.append(header::SET_COOKIE, cookie);
    }
    (status, headers, body).into_response()
}

fn user_response(status: StatusCode, outcome: AuthOutcome) -> Response {
    with_cookies(status, outcome.set_cookies, Json(outcome.user))
}

/// sign_in
///
/// [Auth Route] Email/password sign-in. On success the session cookie set by the auth
/// service is relayed and the signed-in user returned.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionUser),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> Result<Response, AppError> {
    let outcome = state.auth.sign_in(&payload).await?;
    tracing::info!(email = %payload.email, "user signed in");
    Ok(user_response(StatusCode::OK, outcome))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = SessionUser),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> Result<Response, AppError> {
    let outcome = state.auth.sign_up(&payload).await?;
    tracing::info!(email = %payload.email, "account created");
    Ok(user_response(StatusCode::CREATED, outcome))
}

/// sign_out
///
/// [Auth Route] Always answers 204. When the auth service cannot be reached the
/// session cookies are expired locally so the browser still ends up signed out.
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses((status = 204, description = "Signed out"))
)]
pub async fn sign_out(cookies: ForwardedCookies, State(state): State<AppState>) -> Response {
    let set_cookies = match state.auth.sign_out(&cookies).await {
        Ok(outcome) if !outcome.set_cookies.is_empty() => outcome.set_cookies,
        Ok(_) => expired_cookies(&state.config.guard.session_cookies),
        Err(err) => {
            tracing::warn!(error = %err, "sign-out failed upstream, clearing cookies locally");
            expired_cookies(&state.config.guard.session_cookies)
        }
    };
    with_cookies(StatusCode::NO_CONTENT, set_cookies, ())
}

fn expired_cookies(names: &[String]) -> Vec<HeaderValue> {
    names
        .iter()
        .filter_map(|name| {
            let secure = if name.starts_with(SECURE_COOKIE_PREFIX) { "; Secure" } else { "" };
            HeaderValue::from_str(&format!("{name}=; Path=/; HttpOnly; Max-Age=0{secure}")).ok()
        })
        .collect()
}

/// get_session
///
/// [Auth Route] The current session, or `null` when the caller is signed out.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses((status = 200, description = "Current session, `null` when signed out", body = Session))
)]
pub async fn get_session(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
) -> Result<Json<Option<Session>>, AppError> {
    Ok(Json(state.auth.session(&cookies).await?))
}
