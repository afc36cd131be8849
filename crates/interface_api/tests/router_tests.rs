//! Router tests against in-memory stores

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use domain_customer::{CustomerStore, InMemoryCustomerStore};
use domain_insights::{AdviceService, InMemoryAdviceCache, InsightsAssembler};
use domain_ledger::{InMemoryLedger, LedgerService, TreasuryStore};
use domain_obligation::{InMemoryObligationStore, ObligationService};
use interface_api::advice::TemplateAdviceGenerator;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use rust_decimal_macros::dec;
use test_utils::TestTreasuryBuilder;

fn app() -> (Router, AppState) {
    let customers: Arc<dyn CustomerStore> = Arc::new(InMemoryCustomerStore::new());
    let store = Arc::new(InMemoryLedger::new());
    let treasuries: Arc<dyn TreasuryStore> = store.clone();

    let ledger = Arc::new(LedgerService::new(
        customers.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let insights = InsightsAssembler::new(treasuries.clone(), store.clone());
    let advice = Arc::new(AdviceService::new(
        insights.clone(),
        Arc::new(TemplateAdviceGenerator),
        Arc::new(InMemoryAdviceCache::new(Duration::from_secs(60))),
    ));

    let state = AppState {
        customers,
        treasuries,
        ledger,
        obligations: Arc::new(ObligationService::new(Arc::new(
            InMemoryObligationStore::new(),
        ))),
        insights,
        advice,
        config: ApiConfig::default(),
    };
    (create_router(state.clone()), state)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (router, _) = app();
    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_customer_record_payment_flow() {
    let (router, state) = app();
    let treasury = state
        .treasuries
        .insert(TestTreasuryBuilder::new().build())
        .await
        .unwrap();

    let (status, customer) = send(
        &router,
        post(
            "/api/v1/customers",
            json!({ "name": "Corner Shop", "category": "regular" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let customer_id = customer["id"].as_str().unwrap().to_string();

    let (status, record) = send(
        &router,
        post(
            "/api/v1/records",
            json!({
                "customer_id": customer_id,
                "title": "Stock invoice",
                "total_amount": "1000",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let record_id = record["id"].as_str().unwrap().to_string();

    let (status, txn) = send(
        &router,
        post(
            &format!("/api/v1/records/{record_id}/pay"),
            json!({
                "amount": "400",
                "treasury_id": treasury.id.as_uuid(),
                "payment_method": "CASH",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(txn["entry_type"], "CREDIT");

    let (status, balance) = send(
        &router,
        get(&format!("/api/v1/customers/{customer_id}/balance")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["total"], "600");

    let (status, statement) = send(
        &router,
        get(&format!("/api/v1/customers/{customer_id}/statement")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = statement["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(statement["current_balance"], "600");
}

#[tokio::test]
async fn test_overpayment_maps_to_422() {
    let (router, state) = app();
    let treasury = state
        .treasuries
        .insert(TestTreasuryBuilder::new().build())
        .await
        .unwrap();

    let (_, customer) = send(
        &router,
        post(
            "/api/v1/customers",
            json!({ "name": "Overpayer", "category": "vip" }),
        ),
    )
    .await;
    let customer_id = customer["id"].as_str().unwrap();

    let (_, record) = send(
        &router,
        post(
            "/api/v1/records",
            json!({
                "customer_id": customer_id,
                "title": "Small invoice",
                "total_amount": "100",
            }),
        ),
    )
    .await;
    let record_id = record["id"].as_str().unwrap();

    let (status, body) = send(
        &router,
        post(
            &format!("/api/v1/records/{record_id}/pay"),
            json!({
                "amount": "150",
                "treasury_id": treasury.id.as_uuid(),
                "payment_method": "TRANSFER",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_credit_limit_maps_to_409() {
    let (router, state) = app();
    let treasury = state
        .treasuries
        .insert(TestTreasuryBuilder::new().build())
        .await
        .unwrap();

    let (_, customer) = send(
        &router,
        post(
            "/api/v1/customers",
            json!({
                "name": "Limited",
                "category": "regular",
                "credit_limit": "1000",
            }),
        ),
    )
    .await;
    let customer_id = customer["id"].as_str().unwrap();

    let debit = |amount: &str| {
        json!({
            "treasury_id": treasury.id.as_uuid(),
            "customer_id": customer_id,
            "entry_type": "DEBIT",
            "amount": amount,
            "payment_method": "CASH",
            "description": "Advance",
        })
    };

    let (status, _) = send(&router, post("/api/v1/transactions", debit("900"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, post("/api/v1/transactions", debit("150"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = send(&router, post("/api/v1/transactions", debit("50"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_obligation_double_done_maps_to_409() {
    let (router, _) = app();

    let (status, obligation) = send(
        &router,
        post(
            "/api/v1/obligations",
            json!({ "title": "Rent", "amount": "2000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = obligation["id"].as_str().unwrap().to_string();

    let (status, done) = send(&router, post(&format!("/api/v1/obligations/{id}/done"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "DONE");
    assert!(!done["done_at"].is_null());

    let (status, _) = send(&router, post(&format!("/api/v1/obligations/{id}/done"), json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, reopened) = send(
        &router,
        post(&format!("/api/v1/obligations/{id}/reopen"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(reopened["done_at"].is_null());
}

#[tokio::test]
async fn test_unknown_customer_statement_is_404() {
    let (router, _) = app();
    let (status, body) = send(
        &router,
        get(&format!(
            "/api/v1/customers/{}/statement",
            uuid::Uuid::new_v4()
        )),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_treasury_snapshot_and_advice() {
    let (router, state) = app();
    let treasury = state
        .treasuries
        .insert(
            TestTreasuryBuilder::new()
                .with_initial_balance(dec!(1000))
                .with_min_balance(dec!(200))
                .build(),
        )
        .await
        .unwrap();

    let (status, snapshot) = send(
        &router,
        get(&format!("/api/v1/treasuries/{}/snapshot", treasury.id.as_uuid())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["treasury"]["balance"], "1000");
    assert_eq!(snapshot["meta"]["period"], "30d");

    let (status, advice) = send(
        &router,
        get(&format!("/api/v1/treasuries/{}/advice", treasury.id.as_uuid())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(advice["advice"].as_str().unwrap().contains("30d"));
}
