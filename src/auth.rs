use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderValue, header};
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    client::{ForwardedCookies, ServiceError, map_status},
    config::DEFAULT_SESSION_COOKIE,
    models::{Session, SessionUser, SignInRequest, SignUpRequest},
};

/// AuthError
///
/// Failures of the auth service glue. Credential problems are kept apart from
/// transport problems so the UI can show "wrong password" instead of "try again".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    AlreadyExists,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Service(err.into())
    }
}

/// AuthOutcome
///
/// Result of a call that may start or end a session. `set_cookies` holds the auth
/// service's `Set-Cookie` headers verbatim; the gateway relays them to the browser.
#[derive(Debug, Clone, Default)]
pub struct AuthOutcome {
    pub user: Option<SessionUser>,
    pub set_cookies: Vec<HeaderValue>,
}

/// AuthProvider Contract
///
/// The session/credential library lives behind this trait. Password hashing, session
/// issuance and validation all happen on the other side; this crate only calls it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthOutcome, AuthError>;

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthOutcome, AuthError>;

    /// Ends the session identified by the forwarded cookies.
    async fn sign_out(&self, cookies: &ForwardedCookies) -> Result<AuthOutcome, AuthError>;

    /// Resolves the forwarded cookies into a session, `None` when there is none.
    async fn session(&self, cookies: &ForwardedCookies) -> Result<Option<Session>, AuthError>;
}

/// AuthState
///
/// The concrete type used to share the auth provider across the application state.
pub type AuthState = Arc<dyn AuthProvider>;

/// Raw response text; empty or `null` means "no payload".
struct ResponseText(String);

impl ResponseText {
    fn is_null(&self) -> bool {
        let trimmed = self.0.trim();
        trimmed.is_empty() || trimmed == "null"
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: Option<SessionUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionMeta {
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct SessionEnvelope {
    user: SessionUser,
    session: Option<SessionMeta>,
}

/// HttpAuthProvider
///
/// Talks to the external auth service's email/password endpoints.
#[derive(Clone)]
pub struct HttpAuthProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthProvider {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str, cookies: &ForwardedCookies) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut builder = self.http.request(method, url);
        if let Some(value) = &cookies.0 {
            builder = builder.header(header::COOKIE, value.clone());
        }
        builder
    }

    /// Sends the request and splits the response into `Set-Cookie` headers and body.
    async fn exchange(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<(Vec<HeaderValue>, ResponseText), AuthError> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "auth service call");

        let set_cookies: Vec<HeaderValue> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .cloned()
            .collect();
        let body = response.text().await.unwrap_or_default();

        match status {
            s if s.is_success() => Ok((set_cookies, ResponseText(body))),
            StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
            StatusCode::CONFLICT => Err(AuthError::AlreadyExists),
            StatusCode::UNPROCESSABLE_ENTITY if body.to_lowercase().contains("exist") => {
                Err(AuthError::AlreadyExists)
            }
            other => Err(map_status(other, &body).into()),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &ResponseText) -> Result<T, AuthError> {
    serde_json::from_str(&body.0).map_err(|err| ServiceError::Decode(err.to_string()).into())
}

fn user_from(body: &ResponseText) -> Result<Option<SessionUser>, AuthError> {
    if body.is_null() {
        return Ok(None);
    }
    Ok(decode::<UserEnvelope>(body)?.user)
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthOutcome, AuthError> {
        let builder = self
            .request(Method::POST, "/sign-up/email", &ForwardedCookies::default())
            .json(&serde_json::json!({
                "name": request.name,
                "email": request.email,
                "password": request.password,
            }));
        let (set_cookies, body) = self.exchange(builder).await?;
        Ok(AuthOutcome {
            user: user_from(&body)?,
            set_cookies,
        })
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthOutcome, AuthError> {
        let builder = self
            .request(Method::POST, "/sign-in/email", &ForwardedCookies::default())
            .json(&serde_json::json!({
                "email": request.email,
                "password": request.password,
                "rememberMe": request.remember_me,
            }));
        let (set_cookies, body) = self.exchange(builder).await?;
        Ok(AuthOutcome {
            user: user_from(&body)?,
            set_cookies,
        })
    }

    async fn sign_out(&self, cookies: &ForwardedCookies) -> Result<AuthOutcome, AuthError> {
        let builder = self
            .request(Method::POST, "/sign-out", cookies)
            .json(&serde_json::json!({}));
        let (set_cookies, _) = self.exchange(builder).await?;
        Ok(AuthOutcome {
            user: None,
            set_cookies,
        })
    }

    async fn session(&self, cookies: &ForwardedCookies) -> Result<Option<Session>, AuthError> {
        if cookies.0.is_none() {
            return Ok(None);
        }

        let builder = self.request(Method::GET, "/get-session", cookies);
        let body = match self.exchange(builder).await {
            Ok((_, body)) => body,
            // An unknown or expired token is "no session", not an error.
            Err(AuthError::InvalidCredentials) => return Ok(None),
            Err(err) => return Err(err),
        };

        if body.is_null() {
            return Ok(None);
        }

        let envelope: SessionEnvelope = decode(&body)?;
        Ok(Some(Session {
            user: envelope.user,
            expires_at: envelope.session.and_then(|s| s.expires_at),
        }))
    }
}

/// MockAuthProvider
///
/// In-memory stand-in used by the tests. Accepts any credentials unless
/// `should_fail` is set, and issues a fixed session cookie.
#[derive(Clone)]
pub struct MockAuthProvider {
    /// When true, credential calls fail with `InvalidCredentials`.
    pub should_fail: bool,
    pub cookie_name: String,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    fn cookie(&self, value: &str, max_age: u32) -> HeaderValue {
        HeaderValue::from_str(&format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
            self.cookie_name
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("invalid=; Path=/"))
    }

    fn user(email: &str, name: Option<String>) -> SessionUser {
        SessionUser {
            id: "mock-user".to_string(),
            email: email.to_string(),
            name,
        }
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthOutcome, AuthError> {
        if self.should_fail {
            return Err(AuthError::AlreadyExists);
        }
        Ok(AuthOutcome {
            user: Some(Self::user(&request.email, Some(request.name.clone()))),
            set_cookies: vec![self.cookie("mock-token", 604_800)],
        })
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthOutcome, AuthError> {
        if self.should_fail {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthOutcome {
            user: Some(Self::user(&request.email, None)),
            set_cookies: vec![self.cookie("mock-token", 604_800)],
        })
    }

    async fn sign_out(&self, _cookies: &ForwardedCookies) -> Result<AuthOutcome, AuthError> {
        Ok(AuthOutcome {
            user: None,
            set_cookies: vec![self.cookie("", 0)],
        })
    }

    async fn session(&self, cookies: &ForwardedCookies) -> Result<Option<Session>, AuthError> {
        let has_cookie = cookies
            .0
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(&format!("{}=", self.cookie_name)));

        if self.should_fail || !has_cookie {
            return Ok(None);
        }
        Ok(Some(Session {
            user: Self::user("admin@example.com", Some("Admin".to_string())),
            expires_at: None,
        }))
    }
}
