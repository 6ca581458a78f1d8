use fund_portal::{
    AppState,
    auth::{AuthState, HttpAuthProvider},
    client::ApiClient,
    config::{AppConfig, Env},
    create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, upstream clients, then the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fund_portal=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Upstream clients. One connection pool shared by the backend and auth clients.
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .expect("FATAL: Failed to build HTTP client");

    let api = ApiClient::from_client(http.clone(), &config.backend_url);
    let auth = Arc::new(HttpAuthProvider::new(http, &config.auth_url)) as AuthState;

    tracing::info!(backend = %config.backend_url, auth = %config.auth_url, "upstream services configured");

    // 4. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { api, auth, config });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|err| panic!("FATAL: Failed to bind {bind_addr}: {err}"));

    tracing::info!("Listening on {bind_addr}");
    tracing::info!("API Documentation (Swagger UI) available at: http://{bind_addr}/swagger-ui");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
}
