//! HTTP client wrapper shared by every service module. One configured
//! `reqwest::Client` (base URL, timeout) plus an optional `Cookie` header copied from
//! the browser request, so backend calls carry the caller's session.

use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header, request::Parts},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Maximum number of error body characters carried into `ServiceError`.
const MAX_ERROR_CHARS: usize = 200;

/// Everything but RFC 3986 unreserved characters is escaped inside a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escapes a caller-supplied value so it stays a single path segment: `/`, `?` and
/// `#` cannot reach the backend URL structure.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// ServiceError
///
/// Failure of a single backend call, classified by HTTP status or transport problem.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Resource not found")]
    NotFound,

    #[error("Session missing or expired")]
    Unauthorized,

    #[error("Not allowed")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend request timed out")]
    Timeout,

    #[error("Unable to reach backend: {0}")]
    Network(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Failed to build request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if err.is_builder() {
            ServiceError::Request(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Shape of the error bodies the backend sends; both keys are optional.
#[derive(Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// ForwardedCookies
///
/// The `Cookie` headers of the incoming request, joined into one value when the client
/// split them. Extracting it never fails; a request without cookies yields
/// `ForwardedCookies(None)` and the backend decides.
#[derive(Debug, Clone, Default)]
pub struct ForwardedCookies(pub Option<HeaderValue>);

impl<S: Send + Sync> FromRequestParts<S> for ForwardedCookies {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values: Vec<&str> = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect();

        let joined = match values.as_slice() {
            [] => None,
            [single] => HeaderValue::from_str(single).ok(),
            many => HeaderValue::from_str(&many.join("; ")).ok(),
        };
        Ok(ForwardedCookies(joined))
    }
}

/// Upload
///
/// A file part received from the browser, ready to be re-sent as multipart.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    fn into_part(self) -> Result<multipart::Part, ServiceError> {
        multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|err| ServiceError::Request(format!("invalid content type: {err}")))
    }
}

/// ApiClient
///
/// Cheap to clone; `with_credentials` produces a per-request copy carrying cookies.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookies: Option<HeaderValue>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(http, base_url))
    }

    pub fn from_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            cookies: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a copy that forwards the caller's cookies on every request.
    pub fn with_credentials(&self, cookies: &ForwardedCookies) -> Self {
        Self {
            cookies: cookies.0.clone(),
            ..self.clone()
        }
    }

    /// Joins the base URL and `path` with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim();
        if self.base_url.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(cookies) = &self.cookies {
            builder = builder.header(header::COOKIE, cookies.clone());
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ServiceError> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "backend call");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ServiceError::Decode(err.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    /// Like `get_json`, but a 404 (or an empty 204) becomes `Ok(None)`.
    pub async fn get_optional_json<T, Q>(&self, path: &str, query: &Q) -> Result<Option<T>, ServiceError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        match self.send(self.request(Method::GET, path).query(query)).await {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => Ok(None),
            Ok(response) => Self::decode(response).await.map(Some),
            Err(ServiceError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PATCH, path).json(body)).await?;
        Self::decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    /// DELETE; the response body, if any, is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Posts `fields` as text parts plus `upload` as a file part named `file_field`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(&'static str, String)>,
        file_field: &'static str,
        upload: Upload,
    ) -> Result<T, ServiceError> {
        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        form = form.part(file_field, upload.into_part()?);

        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::decode(response).await
    }
}

/// Maps a non-success backend status into a `ServiceError`.
pub fn map_status(status: StatusCode, body: &str) -> ServiceError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ServiceError::Unauthorized,
        StatusCode::FORBIDDEN => ServiceError::Forbidden,
        StatusCode::NOT_FOUND => ServiceError::NotFound,
        StatusCode::CONFLICT => ServiceError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Rejected(message),
        other => ServiceError::Status {
            status: other.as_u16(),
            message,
        },
    }
}

/// Prefers the `message`/`error` field of a JSON body, falls back to the raw text.
fn error_message(body: &str) -> String {
    let extracted = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .unwrap_or_else(|| body.trim().to_string());

    let truncated: String = extracted.chars().take(MAX_ERROR_CHARS).collect();
    if truncated.is_empty() {
        "no details".to_string()
    } else {
        truncated
    }
}
