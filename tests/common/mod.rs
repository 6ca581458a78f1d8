//! Stub backend shared by the integration tests. Serves canned JSON for the backend
//! REST API and records every request it receives.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, Request, State},
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const TIMESTAMP: &str = "2024-01-01T00:00:00Z";
pub const SESSION_COOKIE: &str = "fund_portal.session_token=mock-token";

pub fn fund_id() -> Uuid {
    Uuid::from_u128(1)
}

// --- Request recording ---

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<SeenRequest>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<SeenRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> SeenRequest {
        self.all().pop().expect("backend received no request")
    }

    pub fn find(&self, method: Method, path: &str) -> Option<SeenRequest> {
        self.all()
            .into_iter()
            .find(|seen| seen.method == method && seen.path == path)
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let seen = {
        let header_text = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        SeenRequest {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            cookie: header_text(header::COOKIE),
            content_type: header_text(header::CONTENT_TYPE),
        }
    };
    log.0.lock().unwrap().push(seen);
    next.run(request).await
}

/// Binds `router` on an ephemeral port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

/// A base URL nothing listens on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    address
}

// --- Fixtures ---

pub fn fund_json(id: Uuid, slug: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "name": format!("Fund {slug}"),
        "slug": slug,
        "code": "AMC-EQ01",
        "category": "equity",
        "risk_level": 5,
        "currency": "IDR",
        "description": null,
        "inception_date": "2020-01-02",
        "management_fee": "1.50",
        "is_active": is_active,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

pub fn price_json(fund_id: &str) -> Value {
    json!({
        "id": Uuid::from_u128(10),
        "fund_id": fund_id,
        "price_date": "2024-06-28",
        "nav": "1523.4410",
        "bid": null,
        "offer": null,
        "created_at": TIMESTAMP
    })
}

pub fn report_json(title: &str, file_url: &str) -> Value {
    json!({
        "id": Uuid::from_u128(20),
        "fund_id": fund_id(),
        "title": title,
        "report_type": "factsheet",
        "period": "2024-06",
        "file_url": file_url,
        "published_at": TIMESTAMP,
        "created_at": TIMESTAMP
    })
}

pub fn news_json(slug: &str, status: &str) -> Value {
    json!({
        "id": Uuid::from_u128(30),
        "title": format!("News {slug}"),
        "slug": slug,
        "excerpt": null,
        "body": "Body",
        "cover_image_url": null,
        "status": status,
        "published_at": TIMESTAMP,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP
    })
}

pub fn member_json(n: u128, slug: &str, display_order: i32, is_visible: bool) -> Value {
    json!({
        "id": Uuid::from_u128(40 + n),
        "full_name": format!("Member {slug}"),
        "slug": slug,
        "position": "Portfolio Manager",
        "department": null,
        "bio": null,
        "photo_url": null,
        "email": null,
        "display_order": display_order,
        "is_visible": is_visible,
        "created_at": TIMESTAMP
    })
}

pub fn branch_json(n: u128, name: &str, city: &str, is_head_office: bool) -> Value {
    json!({
        "id": Uuid::from_u128(50 + n),
        "name": name,
        "city": city,
        "address": "Main street 1",
        "phone": null,
        "email": null,
        "latitude": null,
        "longitude": null,
        "is_head_office": is_head_office,
        "created_at": TIMESTAMP
    })
}

pub fn message_json(n: u128, is_read: bool) -> Value {
    json!({
        "id": Uuid::from_u128(60 + n),
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": null,
        "subject": "Account opening",
        "message": "I would like to open an account.",
        "is_read": is_read,
        "created_at": TIMESTAMP
    })
}

pub fn settings_json() -> Value {
    json!({
        "phone": "+62 21 555 0100",
        "email": "info@example.com",
        "address": "Jl. Sudirman 1, Jakarta",
        "working_hours": "Mon-Fri 08:00-17:00",
        "map_url": null,
        "facebook_url": null,
        "linkedin_url": null,
        "instagram_url": null,
        "x_url": null
    })
}

fn page(items: Vec<Value>, total: u64, query: &HashMap<String, String>) -> Value {
    json!({
        "items": items,
        "total": total,
        "page": query.get("page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(1),
        "per_page": query.get("per_page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(12)
    })
}

// --- Stub backend ---

async fn create_fund(Json(body): Json<Value>) -> Response {
    if body["slug"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "slug already in use" })),
        )
            .into_response();
    }
    let mut fund = fund_json(Uuid::from_u128(2), body["slug"].as_str().unwrap_or(""), true);
    fund["name"] = body["name"].clone();
    (StatusCode::CREATED, Json(fund)).into_response()
}

async fn fund_by_slug(Path(slug): Path<String>) -> Response {
    match slug.as_str() {
        "global-equity" => Json(fund_json(fund_id(), &slug, true)).into_response(),
        "legacy-bond" => Json(fund_json(Uuid::from_u128(3), &slug, false)).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "fund not found" }))).into_response(),
    }
}

async fn latest_price(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(price_json(query.get("fund_id").map(String::as_str).unwrap_or_default()))
}

/// Echoes the multipart form back as a report: title from the `title` part, file URL
/// from the `file` part's name and size.
async fn create_report(mut multipart: Multipart) -> Response {
    let mut title = String::new();
    let mut file_url = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name().unwrap_or_default() {
            "title" => title = field.text().await.unwrap(),
            "file" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                file_url = format!("/uploads/{name}?size={}", bytes.len());
            }
            _ => {}
        }
    }
    (StatusCode::CREATED, Json(report_json(&title, &file_url))).into_response()
}

async fn news_by_slug(Path(slug): Path<String>) -> Response {
    match slug.as_str() {
        "rate-cut" => Json(news_json(&slug, "published")).into_response(),
        "draft-post" => Json(news_json(&slug, "draft")).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn member_by_slug(Path(slug): Path<String>) -> Response {
    match slug.as_str() {
        "jane" => Json(member_json(1, &slug, 1, true)).into_response(),
        "ghost" => Json(member_json(3, &slug, 0, false)).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `/uploads/{part}/{file name}` for the first file part, so tests can check which
/// multipart part name the gateway used.
async fn uploaded_file(mut multipart: Multipart) -> String {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let part = field.name().unwrap_or_default().to_string();
            return format!("/uploads/{part}/{file_name}");
        }
    }
    String::new()
}

async fn create_news(Json(body): Json<Value>) -> Response {
    let mut post = news_json(
        body["slug"].as_str().unwrap_or_default(),
        body["status"].as_str().unwrap_or("draft"),
    );
    post["title"] = body["title"].clone();
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn update_news(Path(id): Path<Uuid>, Json(body): Json<Value>) -> Json<Value> {
    let mut post = news_json("rate-cut", body["status"].as_str().unwrap_or("published"));
    post["id"] = json!(id);
    if let Some(title) = body.get("title") {
        post["title"] = title.clone();
    }
    Json(post)
}

async fn news_cover(Path(id): Path<Uuid>, multipart: Multipart) -> Json<Value> {
    let mut post = news_json("rate-cut", "published");
    post["id"] = json!(id);
    post["cover_image_url"] = json!(uploaded_file(multipart).await);
    Json(post)
}

async fn create_member(Json(body): Json<Value>) -> Response {
    let mut member = member_json(4, body["slug"].as_str().unwrap_or_default(), 0, true);
    member["full_name"] = body["full_name"].clone();
    (StatusCode::CREATED, Json(member)).into_response()
}

async fn update_member(Path(id): Path<Uuid>, Json(body): Json<Value>) -> Json<Value> {
    let mut member = member_json(1, "jane", 1, true);
    member["id"] = json!(id);
    if let Some(position) = body.get("position") {
        member["position"] = position.clone();
    }
    Json(member)
}

async fn member_photo(Path(id): Path<Uuid>, multipart: Multipart) -> Json<Value> {
    let mut member = member_json(1, "jane", 1, true);
    member["id"] = json!(id);
    member["photo_url"] = json!(uploaded_file(multipart).await);
    Json(member)
}

async fn create_branch(Json(body): Json<Value>) -> Response {
    let mut branch = branch_json(
        4,
        body["name"].as_str().unwrap_or_default(),
        body["city"].as_str().unwrap_or_default(),
        body["is_head_office"].as_bool().unwrap_or(false),
    );
    branch["latitude"] = body["latitude"].clone();
    branch["longitude"] = body["longitude"].clone();
    (StatusCode::CREATED, Json(branch)).into_response()
}

async fn update_branch(Path(id): Path<Uuid>, Json(body): Json<Value>) -> Json<Value> {
    let mut branch = branch_json(1, "Surabaya Branch", "Surabaya", false);
    branch["id"] = json!(id);
    if let Some(phone) = body.get("phone") {
        branch["phone"] = phone.clone();
    }
    Json(branch)
}

async fn mark_read(Path(id): Path<Uuid>, Json(body): Json<Value>) -> Json<Value> {
    let mut message = message_json(0, body["is_read"].as_bool().unwrap_or(false));
    message["id"] = json!(id);
    Json(message)
}

/// The backend REST API as the gateway sees it.
pub fn backend_router(log: RequestLog) -> Router {
    Router::new()
        .route(
            "/funds",
            get(|| async {
                Json(json!([
                    fund_json(fund_id(), "global-equity", true),
                    fund_json(Uuid::from_u128(3), "legacy-bond", false)
                ]))
            })
            .post(create_fund),
        )
        .route("/funds/slug/{slug}", get(fund_by_slug))
        .route(
            "/funds/{id}",
            get(|| async { Json(fund_json(fund_id(), "global-equity", true)) })
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/funds/prices/latest", get(latest_price))
        .route(
            "/funds/prices",
            get(|| async { Json(json!([price_json(&fund_id().to_string())])) }),
        )
        .route(
            "/fund-reports",
            get(|| async { Json(json!([report_json("Factsheet June", "/uploads/june.pdf")])) })
                .post(create_report),
        )
        .route(
            "/news",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(page(vec![news_json("rate-cut", "published")], 1, &query))
            }),
        )
        .route("/news/slug/{slug}", get(news_by_slug))
        .route(
            "/admin/news",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(page(vec![news_json("rate-cut", "published")], 3, &query))
            })
            .post(create_news),
        )
        .route("/admin/news/{id}", patch(update_news))
        .route(
            "/team-members",
            get(|| async {
                Json(json!([
                    member_json(2, "budi", 2, true),
                    member_json(1, "jane", 1, true),
                    member_json(3, "ghost", 0, false)
                ]))
            })
            .post(create_member),
        )
        .route(
            "/team-members/{id}",
            patch(update_member).delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/team-members/{id}/photo", post(member_photo))
        .route("/team-members/slug/{slug}", get(member_by_slug))
        .route(
            "/branches",
            get(|| async {
                Json(json!([
                    branch_json(1, "Surabaya Branch", "Surabaya", false),
                    branch_json(2, "Bandung Branch", "Bandung", false),
                    branch_json(3, "Head Office", "Jakarta", true)
                ]))
            })
            .post(create_branch),
        )
        .route(
            "/branches/{id}",
            get(|Path(id): Path<Uuid>| async move {
                let mut branch = branch_json(1, "Surabaya Branch", "Surabaya", false);
                branch["id"] = json!(id);
                Json(branch)
            })
            .patch(update_branch)
            .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/contact-messages",
            get(|| async {
                Json(json!([
                    message_json(1, true),
                    message_json(2, false),
                    message_json(3, false)
                ]))
            })
            .post(|| async { (StatusCode::CREATED, Json(message_json(4, false))) }),
        )
        .route("/contact-messages/{id}", patch(mark_read))
        .route(
            "/contact-settings",
            get(|| async { Json(settings_json()) }).put(|Json(body): Json<Value>| async move {
                Json(body)
            }),
        )
        .route("/admin/news/{id}/cover", post(news_cover))
        .layer(middleware::from_fn_with_state(log, record))
}

/// Spawns the stub backend and returns its URL with the request log.
pub async fn spawn_backend() -> (String, RequestLog) {
    let log = RequestLog::default();
    let address = spawn_server(backend_router(log.clone())).await;
    (address, log)
}
