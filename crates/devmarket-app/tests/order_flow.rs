//! Order detail end-to-end: stepper position, role-gated action, and the
//! PATCH-then-refetch dispatch cycle, including the preserved
//! PAYMENT_SUBMITTED stepper quirk.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use devmarket_app::views::order::OrderView;
use devmarket_client::orders::OrderAction;
use devmarket_types::api::PaymentProofCreate;
use devmarket_types::models::{OrderStatus, User};

struct Stub {
    status: Mutex<String>,
    last_proof: Mutex<Option<Value>>,
    order_id: Uuid,
    gig_id: Uuid,
    client_id: Uuid,
    freelancer_id: Uuid,
}

impl Stub {
    fn order_json(&self) -> Value {
        json!({
            "id": self.order_id,
            "gig_id": self.gig_id,
            "client_id": self.client_id,
            "freelancer_id": self.freelancer_id,
            "status": *self.status.lock().unwrap(),
            "payment_status": "pending",
            "created_at": "2024-04-04T09:00:00"
        })
    }
}

async fn orders(State(stub): State<Arc<Stub>>) -> impl IntoResponse {
    Json(json!([stub.order_json()]))
}

async fn gig(State(stub): State<Arc<Stub>>, Path(_id): Path<Uuid>) -> impl IntoResponse {
    Json(json!({
        "id": stub.gig_id,
        "freelancer_id": stub.freelancer_id,
        "title": "API integration",
        "description": "Wire up the thing.",
        "price": 250.0,
        "delivery_days": 5,
        "is_active": true,
        "created_at": "2024-04-01T09:00:00"
    }))
}

async fn submit_payment(
    State(stub): State<Arc<Stub>>,
    Path(_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *stub.last_proof.lock().unwrap() = Some(body);
    *stub.status.lock().unwrap() = "PAYMENT_SUBMITTED".to_string();
    Json(stub.order_json())
}

async fn serve(stub: Arc<Stub>) -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/orders/", get(orders))
        .route("/api/v1/gigs/{id}", get(gig))
        .route("/api/v1/orders/{id}/submit-payment", patch(submit_payment))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn client_submits_payment_and_the_view_refetches() {
    let stub = Arc::new(Stub {
        status: Mutex::new("PENDING_PAYMENT".to_string()),
        last_proof: Mutex::new(None),
        order_id: Uuid::new_v4(),
        gig_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        freelancer_id: Uuid::new_v4(),
    });
    let addr = serve(stub.clone()).await;
    let api = devmarket_client::ApiClient::new(format!("http://{addr}/api/v1")).unwrap();

    let client = User {
        id: stub.client_id,
        full_name: "Ada".into(),
        email: "ada@example.com".into(),
    };

    let mut view = OrderView::load(&api, &client, stub.order_id).await.unwrap();
    assert_eq!(view.actions(), &[OrderAction::SubmitPayment]);
    let rendered = view.render();
    assert!(rendered.contains("[x] Paid --- [ ] Working"), "{rendered}");

    let proof = PaymentProofCreate {
        proof_reference: "TXN-42".into(),
        payer_name: "Ada".into(),
        amount: 250.0,
    };
    view.dispatch(&api, OrderAction::SubmitPayment, Some(proof))
        .await
        .unwrap();

    // The PATCH carried the proof fields.
    let sent = stub.last_proof.lock().unwrap().clone().unwrap();
    assert_eq!(sent["proof_reference"], "TXN-42");
    assert_eq!(sent["payer_name"], "Ada");
    assert_eq!(sent["amount"], 250.0);

    // Re-fetched state: status advanced, no client action left, and the
    // stepper still sits at step 0 (the documented PAYMENT_SUBMITTED
    // rendering quirk).
    assert_eq!(view.order().status, OrderStatus::PaymentSubmitted);
    assert!(view.actions().is_empty());
    let rendered = view.render();
    assert!(rendered.contains("[x] Paid --- [ ] Working"), "{rendered}");
}

#[tokio::test]
async fn missing_order_reports_order_not_found() {
    let stub = Arc::new(Stub {
        status: Mutex::new("PENDING_PAYMENT".to_string()),
        last_proof: Mutex::new(None),
        order_id: Uuid::new_v4(),
        gig_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        freelancer_id: Uuid::new_v4(),
    });
    let addr = serve(stub.clone()).await;
    let api = devmarket_client::ApiClient::new(format!("http://{addr}/api/v1")).unwrap();

    let viewer = User {
        id: stub.client_id,
        full_name: "Ada".into(),
        email: "ada@example.com".into(),
    };

    let err = OrderView::load(&api, &viewer, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err, "Order not found");
}
