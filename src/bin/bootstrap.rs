//! Creates the first admin account through the auth service's own sign-up endpoint.
//!
//! Reads `ADMIN_NAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD` (and the usual `.env`). When
//! the account already exists the credentials are verified by signing in instead.
//! Exits non-zero on any failure.

use std::{env, process::ExitCode};

use fund_portal::{
    AppConfig,
    auth::{AuthError, AuthProvider, HttpAuthProvider},
    models::{SignInRequest, SignUpRequest},
    validation,
};
use validator::Validate;

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("{name} must be set"))
}

fn read_request() -> Result<SignUpRequest, String> {
    let request = SignUpRequest {
        name: required("ADMIN_NAME")?,
        email: required("ADMIN_EMAIL")?,
        password: required("ADMIN_PASSWORD")?,
    };
    request
        .validate()
        .map_err(|errors| validation::describe(&errors).join(", "))?;
    Ok(request)
}

async fn run(provider: &dyn AuthProvider, request: &SignUpRequest) -> Result<(), AuthError> {
    match provider.sign_up(request).await {
        Ok(_) => {
            tracing::info!(email = %request.email, "admin account created");
            Ok(())
        }
        Err(AuthError::AlreadyExists) => {
            tracing::info!(email = %request.email, "admin account exists, verifying credentials");
            let sign_in = SignInRequest {
                email: request.email.clone(),
                password: request.password.clone(),
                remember_me: false,
            };
            provider.sign_in(&sign_in).await?;
            tracing::info!(email = %request.email, "admin credentials verified");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bootstrap=info,fund_portal=info".into()),
        )
        .init();

    let config = AppConfig::load();

    let request = match read_request() {
        Ok(request) => request,
        Err(message) => {
            tracing::error!("invalid admin settings: {message}");
            return ExitCode::FAILURE;
        }
    };

    let http = match reqwest::Client::builder().timeout(config.request_timeout).build() {
        Ok(http) => http,
        Err(err) => {
            tracing::error!(error = %err, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let provider = HttpAuthProvider::new(http, &config.auth_url);

    match run(&provider, &request).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "bootstrap failed");
            ExitCode::FAILURE
        }
    }
}
