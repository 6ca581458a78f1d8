use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::GuardConfig;

/// SessionState
///
/// The two states a request can be in as far as the guard is concerned. The
/// transition is decided purely by looking up the configured cookie names; nothing
/// about the cookie value is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    CookiePresent,
}

/// GuardDecision
///
/// Outcome of evaluating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hand the request to the router untouched.
    Forward,
    /// No session cookie on a protected path.
    RedirectToLogin(String),
    /// Session cookie present on a sign-in/sign-up page.
    RedirectToRoot(String),
}

/// Returns the session state implied by the `Cookie` headers of a request.
///
/// Presence-only: an empty, expired or forged value still counts as present. The
/// backend rejects such sessions when the first API call is made.
pub fn session_state(headers: &HeaderMap, config: &GuardConfig) -> SessionState {
    let present = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split('=').next())
        .map(str::trim)
        .any(|name| config.session_cookies.iter().any(|c| c == name));

    if present {
        SessionState::CookiePresent
    } else {
        SessionState::Unauthenticated
    }
}

/// True when `path` equals `prefix` or continues it with a new segment.
fn has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn has_static_extension(path: &str, config: &GuardConfig) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => config
            .static_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

/// Paths forwarded regardless of cookie state.
pub fn is_bypassed(path: &str, config: &GuardConfig) -> bool {
    config.bypass_prefixes.iter().any(|p| has_prefix(path, p)) || has_static_extension(path, config)
}

pub fn is_auth_page(path: &str, config: &GuardConfig) -> bool {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    config.auth_pages.iter().any(|page| page == trimmed)
}

/// evaluate
///
/// Decides what happens to a request for `path` in the given session state. Bypass
/// rules win over everything, then auth pages, then the default protected rule.
pub fn evaluate(path: &str, state: SessionState, config: &GuardConfig) -> GuardDecision {
    if is_bypassed(path, config) {
        return GuardDecision::Forward;
    }

    if is_auth_page(path, config) {
        return match state {
            SessionState::CookiePresent => GuardDecision::RedirectToRoot(config.root_path.clone()),
            SessionState::Unauthenticated => GuardDecision::Forward,
        };
    }

    match state {
        SessionState::CookiePresent => GuardDecision::Forward,
        SessionState::Unauthenticated => GuardDecision::RedirectToLogin(config.login_path.clone()),
    }
}

/// route_guard
///
/// Middleware applied to the whole router. Computes the decision from the request
/// path and cookies and either forwards or answers with a `307 Temporary Redirect`.
pub async fn route_guard(State(config): State<GuardConfig>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let state = session_state(request.headers(), &config);
    let decision = evaluate(&path, state, &config);

    tracing::debug!(path = %path, session = ?state, decision = ?decision, "route guard");

    match decision {
        GuardDecision::Forward => next.run(request).await,
        GuardDecision::RedirectToLogin(target) | GuardDecision::RedirectToRoot(target) => {
            Redirect::temporary(&target).into_response()
        }
    }
}
