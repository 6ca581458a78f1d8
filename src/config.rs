use std::env;
use std::time::Duration;

/// Default session cookie name issued by the auth service.
pub const DEFAULT_SESSION_COOKIE: &str = "fund_portal.session_token";

/// Prefix browsers require on cookies set with the `Secure` attribute over HTTPS.
pub const SECURE_COOKIE_PREFIX: &str = "__Secure-";

/// AppConfig
///
/// Holds the gateway's entire configuration state. Loaded once at startup and shared
/// immutably through `AppState`, so every request sees the same backend URLs, cookie
/// names and guard rules.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and fail-fast rules.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Base URL of the firm's backend REST API (funds, news, branches, ...).
    pub backend_url: String,
    // Base URL of the external auth service (sign-in, sign-up, sessions).
    pub auth_url: String,
    // Upper bound for every outgoing backend/auth request.
    pub request_timeout: Duration,
    // Directory holding the prebuilt dashboard/marketing frontend.
    pub static_dir: String,
    // Allowed browser origin for credentialed CORS requests. `None` allows any origin.
    pub cors_origin: Option<String>,
    // Rules consumed by the route protection middleware.
    pub guard: GuardConfig,
}

/// Env
///
/// Defines the runtime context: local development (pretty logs, localhost defaults)
/// or production (JSON logs, mandatory upstream URLs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// GuardConfig
///
/// Path and cookie rules for the route protection middleware. Kept separate from
/// `AppConfig` so the guard can be exercised without a full configuration.
#[derive(Clone, Debug)]
pub struct GuardConfig {
    /// Cookie names whose presence marks a request as carrying a session.
    pub session_cookies: Vec<String>,
    /// Path prefixes forwarded unconditionally.
    pub bypass_prefixes: Vec<String>,
    /// File extensions (without the dot) forwarded unconditionally.
    pub static_extensions: Vec<String>,
    /// Sign-in/sign-up pages. Visiting them with a session redirects to `root_path`.
    pub auth_pages: Vec<String>,
    pub login_path: String,
    pub root_path: String,
}

impl GuardConfig {
    /// Builds the default rule set around the given session cookie name, recognizing
    /// both the plain name and its `__Secure-` variant.
    pub fn with_cookie_name(name: &str) -> Self {
        Self {
            session_cookies: vec![name.to_string(), format!("{SECURE_COOKIE_PREFIX}{name}")],
            bypass_prefixes: [
                "/api/public",
                "/api/auth",
                "/health",
                "/swagger-ui",
                "/api-docs",
                "/static",
                "/assets",
                "/uploads",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            static_extensions: [
                "css", "js", "map", "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "avif",
                "woff", "woff2", "ttf", "otf", "eot", "txt", "xml", "pdf",
            ]
            .iter()
            .map(|e| e.to_string())
            .collect(),
            auth_pages: vec!["/login".to_string(), "/register".to_string()],
            login_path: "/login".to_string(),
            root_path: "/".to_string(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::with_cookie_name(DEFAULT_SESSION_COOKIE)
    }
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a non-panicking configuration pointing at localhost, used for test
    /// state scaffolding without touching environment variables.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            backend_url: "http://localhost:8080".to_string(),
            auth_url: "http://localhost:8080/api/auth".to_string(),
            request_timeout: Duration::from_secs(10),
            static_dir: "public".to_string(),
            cors_origin: None,
            guard: GuardConfig::default(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `BACKEND_API_URL` or `AUTH_API_URL` is missing, so the
    /// gateway never starts pointed at a localhost fallback.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        let (backend_url, auth_url) = match env {
            Env::Production => (
                env::var("BACKEND_API_URL").expect("FATAL: BACKEND_API_URL required in prod"),
                env::var("AUTH_API_URL").expect("FATAL: AUTH_API_URL required in prod"),
            ),
            Env::Local => (
                env::var("BACKEND_API_URL").unwrap_or(defaults.backend_url),
                env::var("AUTH_API_URL").unwrap_or(defaults.auth_url),
            ),
        };

        // A malformed timeout falls back to the default rather than aborting startup.
        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let cookie_name = env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());

        Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            backend_url,
            auth_url,
            request_timeout,
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|o| !o.trim().is_empty()),
            guard: GuardConfig::with_cookie_name(cookie_name.trim()),
        }
    }
}
