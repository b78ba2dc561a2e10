//! Contract tests for the API client against a local stub backend.
//!
//! Each test binds an axum router on a loopback port, points an ApiClient
//! at it, and asserts the normalized behavior the pages rely on.

use std::net::SocketAddr;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use devmarket_client::{ApiClient, Session};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{addr}/api/v1")).unwrap()
}

#[tokio::test]
async fn error_body_detail_becomes_the_error_message() {
    let app = Router::new().route(
        "/api/v1/orders/{id}/approve",
        patch(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Order not found"})),
            )
        }),
    );
    let addr = serve(app).await;
    let api = client_for(addr);

    let err = api.approve(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.to_string(), "Order not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_generic_message() {
    let app = Router::new().route(
        "/api/v1/gigs/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace html") }),
    );
    let addr = serve(app).await;
    let api = client_for(addr);

    let err = api.list_gigs().await.unwrap_err();
    assert_eq!(err.to_string(), "API error: 500");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn success_body_decodes_into_typed_records() {
    let freelancer = Uuid::new_v4();
    let app = Router::new().route(
        "/api/v1/gigs/",
        get(move || async move {
            Json(json!([{
                "id": Uuid::new_v4(),
                "freelancer_id": freelancer,
                "title": "Build a landing page",
                "description": "Responsive, fast, deployed.",
                "price": 120.0,
                "delivery_days": 3,
                "is_active": true,
                "created_at": "2024-05-02T09:00:00"
            }]))
        }),
    );
    let addr = serve(app).await;
    let api = client_for(addr);

    let gigs = api.list_gigs().await.unwrap();
    assert_eq!(gigs.len(), 1);
    assert_eq!(gigs[0].title, "Build a landing page");
    assert_eq!(gigs[0].freelancer_id, freelancer);
}

#[tokio::test]
async fn session_cookie_is_replayed_on_later_calls() {
    async fn me() -> impl IntoResponse {
        let mut headers = HeaderMap::new();
        headers.insert(header::SET_COOKIE, "session=abc123; Path=/".parse().unwrap());
        (
            headers,
            Json(json!({
                "id": Uuid::new_v4(),
                "full_name": "Ada",
                "email": "ada@example.com"
            })),
        )
    }

    async fn orders(headers: HeaderMap) -> impl IntoResponse {
        let has_session = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("session=abc123"));
        if has_session {
            Json(json!([])).into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
        }
    }

    let app = Router::new()
        .route("/api/v1/me", get(me))
        .route("/api/v1/orders/", get(orders));
    let addr = serve(app).await;
    let api = client_for(addr);

    let session = Session::resolve(&api).await;
    assert_eq!(session.user().unwrap().full_name, "Ada");

    let orders = api.list_orders().await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn failed_identity_probe_resolves_to_anonymous() {
    let app = Router::new().route(
        "/api/v1/me",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))) }),
    );
    let addr = serve(app).await;
    let api = client_for(addr);

    let session = Session::resolve(&api).await;
    assert!(session.user().is_none());
    assert!(!session.is_pending());
}
