mod common;

use axum::{
    Json, Router,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use common::spawn_server;
use fund_portal::{
    auth::{AuthError, AuthProvider, HttpAuthProvider},
    client::ForwardedCookies,
    models::{SignInRequest, SignUpRequest},
};
use serde_json::{Value, json};

const ISSUED: &str = "fund_portal.session_token=tok123; Path=/; HttpOnly; SameSite=Lax";

/// Minimal stand-in for the auth service's email/password API.
fn auth_service() -> Router {
    Router::new()
        .route(
            "/sign-in/email",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "correct-horse" && body["rememberMe"] == true {
                    (
                        [(header::SET_COOKIE, ISSUED)],
                        Json(json!({ "user": { "id": "u1", "email": body["email"], "name": "Admin" } })),
                    )
                        .into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid email or password" })))
                        .into_response()
                }
            }),
        )
        .route(
            "/sign-up/email",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "taken@example.com" {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({ "message": "User already exists" })),
                    )
                        .into_response()
                } else {
                    (
                        [(header::SET_COOKIE, ISSUED)],
                        Json(json!({ "user": { "id": "u2", "email": body["email"], "name": body["name"] } })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/sign-out",
            post(|| async {
                (
                    [(header::SET_COOKIE, "fund_portal.session_token=; Path=/; Max-Age=0")],
                    Json(json!({ "success": true })),
                )
            }),
        )
        .route(
            "/get-session",
            get(|headers: HeaderMap| async move {
                let cookie = headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if cookie.contains("tok123") {
                    Json(json!({
                        "user": { "id": "u1", "email": "admin@example.com", "name": "Admin" },
                        "session": { "expiresAt": "2030-01-01T00:00:00Z" }
                    }))
                } else {
                    Json(Value::Null)
                }
            }),
        )
}

async fn provider() -> HttpAuthProvider {
    let address = spawn_server(auth_service()).await;
    HttpAuthProvider::new(reqwest::Client::new(), &format!("{address}/"))
}

fn cookies(value: &'static str) -> ForwardedCookies {
    ForwardedCookies(Some(HeaderValue::from_static(value)))
}

#[tokio::test]
async fn test_sign_in_captures_set_cookie() {
    let auth = provider().await;
    let request = SignInRequest {
        email: "admin@example.com".to_string(),
        password: "correct-horse".to_string(),
        remember_me: true,
    };

    let outcome = auth.sign_in(&request).await.unwrap();

    assert_eq!(outcome.set_cookies, vec![HeaderValue::from_static(ISSUED)]);
    assert_eq!(outcome.user.unwrap().email, "admin@example.com");
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let auth = provider().await;
    let request = SignInRequest {
        email: "admin@example.com".to_string(),
        password: "wrong-password".to_string(),
        remember_me: true,
    };

    let err = auth.sign_in(&request).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_sign_up_existing_account() {
    let auth = provider().await;
    let request = SignUpRequest {
        name: "Admin".to_string(),
        email: "taken@example.com".to_string(),
        password: "correct-horse".to_string(),
    };

    let err = auth.sign_up(&request).await.unwrap_err();
    assert!(matches!(err, AuthError::AlreadyExists));

    let request = SignUpRequest {
        email: "new@example.com".to_string(),
        ..request
    };
    let outcome = auth.sign_up(&request).await.unwrap();
    assert_eq!(outcome.user.unwrap().name.as_deref(), Some("Admin"));
}

#[tokio::test]
async fn test_sign_out_relays_expiring_cookie() {
    let auth = provider().await;
    let outcome = auth
        .sign_out(&cookies("fund_portal.session_token=tok123"))
        .await
        .unwrap();
    assert_eq!(outcome.set_cookies.len(), 1);
    assert!(outcome.user.is_none());
}

#[tokio::test]
async fn test_session_lookup() {
    let auth = provider().await;

    let session = auth
        .session(&cookies("fund_portal.session_token=tok123"))
        .await
        .unwrap()
        .expect("session");
    assert_eq!(session.user.id, "u1");
    assert!(session.expires_at.is_some());

    let none = auth
        .session(&cookies("fund_portal.session_token=stale"))
        .await
        .unwrap();
    assert!(none.is_none());

    // No cookies: no call is made at all.
    let none = auth.session(&ForwardedCookies::default()).await.unwrap();
    assert!(none.is_none());
}
