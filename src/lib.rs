use axum::{
    Router,
    extract::FromRef,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod services;
pub mod validation;

// Module for routing segregation (Public, Auth, Admin).
pub mod routes;
use routes::{admin, auth as auth_routes, public};

// --- Public Re-exports ---

pub use auth::{AuthProvider, AuthState, HttpAuthProvider, MockAuthProvider};
pub use client::{ApiClient, ForwardedCookies, ServiceError};
pub use config::{AppConfig, GuardConfig};
pub use error::AppError;

/// ApiDoc
///
/// Auto-generated OpenAPI document for every gateway endpoint, served at
/// `/api-docs/openapi.json` and rendered by the Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::public::list_funds, handlers::public::get_fund,
        handlers::public::get_fund_prices, handlers::public::get_fund_reports,
        handlers::public::list_news, handlers::public::get_news,
        handlers::public::list_team, handlers::public::get_team_member,
        handlers::public::list_branches, handlers::public::get_faq,
        handlers::public::get_contact_settings, handlers::public::submit_contact,
        handlers::auth::sign_in, handlers::auth::sign_up, handlers::auth::sign_out,
        handlers::auth::get_session,
        handlers::dashboard::get_overview,
        handlers::funds::list_funds, handlers::funds::get_fund, handlers::funds::create_fund,
        handlers::funds::update_fund, handlers::funds::delete_fund,
        handlers::fund_prices::list_prices, handlers::fund_prices::create_price,
        handlers::fund_prices::update_price, handlers::fund_prices::delete_price,
        handlers::fund_reports::list_reports, handlers::fund_reports::get_report,
        handlers::fund_reports::create_report, handlers::fund_reports::update_report,
        handlers::fund_reports::delete_report,
        handlers::news::list_news, handlers::news::get_news, handlers::news::create_news,
        handlers::news::update_news, handlers::news::delete_news,
        handlers::news::upload_news_cover,
        handlers::team::list_members, handlers::team::get_member, handlers::team::create_member,
        handlers::team::update_member, handlers::team::delete_member,
        handlers::team::upload_member_photo,
        handlers::branches::list_branches, handlers::branches::get_branch,
        handlers::branches::create_branch, handlers::branches::update_branch,
        handlers::branches::delete_branch,
        handlers::contact::list_messages, handlers::contact::get_message,
        handlers::contact::mark_message_read, handlers::contact::delete_message,
        handlers::contact::get_settings, handlers::contact::update_settings,
    ),
    components(
        schemas(
            models::Fund, models::FundCategory, models::FundPrice, models::FundReport,
            models::ReportType, models::NewsPost, models::NewsStatus, models::TeamMember,
            models::Branch, models::ContactMessage, models::ContactSettings,
            models::CreateFundRequest, models::UpdateFundRequest,
            models::CreateFundPriceRequest, models::UpdateFundPriceRequest,
            models::FundReportMetadata, models::UpdateFundReportRequest,
            models::CreateNewsRequest, models::UpdateNewsRequest,
            models::CreateTeamMemberRequest, models::UpdateTeamMemberRequest,
            models::CreateBranchRequest, models::UpdateBranchRequest,
            models::ContactMessageRequest, models::MarkMessageReadRequest,
            models::UpdateContactSettingsRequest,
            models::SignInRequest, models::SignUpRequest, models::SessionUser, models::Session,
            models::FaqEntry, models::FundDetail, models::DashboardOverview,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "fund-portal", description = "Asset management web property API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Single immutable container shared by every request: the backend client, the auth
/// provider and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// Backend REST client without credentials; admin handlers derive a per-request
    /// copy carrying the caller's cookies.
    pub api: ApiClient,
    /// Auth service glue (sign-in, sign-up, sessions).
    pub auth: AuthState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for ApiClient {
    fn from_ref(app_state: &AppState) -> ApiClient {
        app_state.api.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(app_state: &AppState) -> AuthState {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for GuardConfig {
    fn from_ref(app_state: &AppState) -> GuardConfig {
        app_state.config.guard.clone()
    }
}

/// create_router
///
/// Assembles the API routers, the static frontend fallback and the middleware stack.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());
    let x_request_id = HeaderName::from_static("x-request-id");

    // Everything that is not an API route is the prebuilt frontend; unknown paths get
    // index.html so client-side routing works on reload.
    let static_dir = state.config.static_dir.clone();
    let frontend = ServeDir::new(&static_dir)
        .fallback(ServeFile::new(format!("{static_dir}/index.html")));

    let guard = middleware::from_fn_with_state(state.config.guard.clone(), guard::route_guard);

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        .nest("/api/public", public::public_routes())
        .nest("/api/auth", auth_routes::auth_routes())
        .nest("/api/admin", admin::admin_routes())
        .fallback_service(frontend)
        .with_state(state);

    // The guard wraps every route, the frontend fallback included: dashboard pages are
    // served by the fallback and must redirect to /login without a session.
    base_router
        .layer(guard)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// cors_layer
///
/// With a configured origin, credentialed requests (session cookies) are allowed from
/// that origin only. Without one, any origin may call the API, but without cookies.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let exact = origin.and_then(|value| match HeaderValue::from_str(value) {
        Ok(header) => Some(header),
        Err(_) => {
            tracing::warn!(origin = value, "ignoring invalid CORS_ORIGIN");
            None
        }
    });

    match exact {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        None => CorsLayer::new()
            .allow_methods(Any)
            .allow_origin(Any)
            .allow_headers(Any),
    }
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: every log line of a request carries its method, URI
/// and `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
