//! Integration tests for [`PartnerCenterApi`] against an in-process mock of
//! the partner REST endpoints.
//!
//! The mock records each request's method, path, query and headers so the
//! tests can assert on what actually went over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use partner_client::{ClientConfig, PartnerApiError, PartnerCenterApi, PartnerOperations};
use partner_core::offers::{CatalogItemId, EligibilityType};
use partner_core::subscription::Subscription;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Mock server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockState {
    fn record(&self, method: Method, uri: &Uri, headers: HeaderMap, body: Option<Value>) {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body,
        });
    }

    fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

fn subscription_json(customer_id: &str, subscription_id: &str) -> Value {
    json!({
        "id": subscription_id,
        "offerId": "CFQ7TTC0LH18:0001:CFQ7TTC0KDLJ",
        "friendlyName": format!("Subscription for {customer_id}"),
        "quantity": 3,
        "billingCycle": "monthly",
        "termDuration": "P1Y",
        "attributes": { "etag": "etag-1", "objectType": "Subscription" }
    })
}

async fn get_subscription(
    State(state): State<MockState>,
    Path((customer_id, subscription_id)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> axum::response::Response {
    state.record(Method::GET, &uri, headers, None);

    if subscription_id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 900, "description": "Subscription not found" })),
        )
            .into_response();
    }

    Json(subscription_json(&customer_id, &subscription_id)).into_response()
}

async fn patch_subscription(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record(Method::PATCH, &uri, headers, Some(body.clone()));
    let mut updated = body;
    updated["status"] = json!("active");
    Json(updated)
}

async fn transition_eligibilities(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    state.record(Method::GET, &uri, headers, None);
    let eligible = params.get("eligibilityType").map(String::as_str) == Some("scheduled");
    Json(json!({
        "totalCount": 1,
        "items": [{
            "catalogItemId": "CFQ7TTC0LF8R:0001:CFQ7TTC0KXG6",
            "title": "Microsoft 365 E5",
            "eligibilities": [{ "isEligible": eligible, "transitionType": "scheduled" }]
        }]
    }))
}

async fn availability(
    State(state): State<MockState>,
    Path((_customer, product, sku, availability)): Path<(String, String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    state.record(Method::GET, &uri, headers, None);
    Json(json!({
        "id": availability,
        "productId": product,
        "skuId": sku,
        "terms": [
            { "duration": "P1M", "description": "One-Month commitment" },
            { "duration": "P1Y", "description": "One-Year commitment", "cancellationPolicies": [] }
        ]
    }))
}

/// Start the mock server on an ephemeral port and return its base URL.
async fn start_mock() -> (String, MockState) {
    let state = MockState::default();

    let app = Router::new()
        .route(
            "/v1/customers/{customer_id}/subscriptions/{subscription_id}",
            get(get_subscription).patch(patch_subscription),
        )
        .route(
            "/v1/customers/{customer_id}/subscriptions/{subscription_id}/transitioneligibilities",
            get(transition_eligibilities),
        )
        .route(
            "/v1/customers/{customer_id}/products/{product_id}/skus/{sku_id}/availabilities/{availability_id}",
            get(availability),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

fn client_for(base_url: &str) -> PartnerCenterApi {
    let mut config = ClientConfig::new("test-token");
    config.api_url = base_url.to_string();
    config.locale = "en-GB".to_string();
    PartnerCenterApi::new(&config).unwrap()
}

// ---------------------------------------------------------------------------
// Test: GET subscription parses the body and sends the standard headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_subscription_sends_auth_and_correlation_headers() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);

    let subscription = api.get_subscription("cust-1", "sub-1").await.unwrap();

    assert_eq!(subscription.id, "sub-1");
    assert_eq!(subscription.quantity, 3);
    assert_eq!(subscription.friendly_name.as_deref(), Some("Subscription for cust-1"));

    let recorded = state.last();
    assert_eq!(recorded.method, Method::GET);
    assert_eq!(recorded.path, "/v1/customers/cust-1/subscriptions/sub-1");
    assert_eq!(recorded.headers["authorization"], "Bearer test-token");
    assert_eq!(recorded.headers["accept"], "application/json");
    assert_eq!(recorded.headers["ms-contract-version"], "v1");
    assert_eq!(recorded.headers["x-locale"], "en-GB");
    assert_eq!(
        recorded.headers["ms-correlationid"].to_str().unwrap(),
        api.correlation_id().to_string()
    );
    assert!(recorded.headers.contains_key("ms-requestid"));
}

// ---------------------------------------------------------------------------
// Test: request IDs differ per request, correlation ID does not
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_id_is_fresh_per_request() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);

    api.get_subscription("cust-1", "sub-1").await.unwrap();
    api.get_subscription("cust-1", "sub-1").await.unwrap();

    let requests = state.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_ne!(
        requests[0].headers["ms-requestid"],
        requests[1].headers["ms-requestid"]
    );
    assert_eq!(
        requests[0].headers["ms-correlationid"],
        requests[1].headers["ms-correlationid"]
    );
}

// ---------------------------------------------------------------------------
// Test: PATCH sends the whole object, unknown fields included
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_subscription_round_trips_unknown_fields() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);

    let mut subscription = api.get_subscription("cust-1", "sub-1").await.unwrap();
    subscription.increment_quantity();

    let updated = api
        .patch_subscription("cust-1", "sub-1", &subscription)
        .await
        .unwrap();

    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.status.as_deref(), Some("active"));

    let recorded = state.last();
    assert_eq!(recorded.method, Method::PATCH);
    let body = recorded.body.unwrap();
    assert_eq!(body["quantity"], 4);
    assert_eq!(body["attributes"]["etag"], "etag-1");
    assert_eq!(body["offerId"], "CFQ7TTC0LH18:0001:CFQ7TTC0KDLJ");
}

// ---------------------------------------------------------------------------
// Test: transition eligibilities carries the eligibility type query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transition_eligibilities_sends_eligibility_type() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);

    let collection = api
        .get_transition_eligibilities("cust-1", "sub-1", EligibilityType::Scheduled)
        .await
        .unwrap();

    assert_eq!(collection.total_count(), 1);
    let item = collection
        .find_catalog_item("CFQ7TTC0LF8R:0001:CFQ7TTC0KXG6")
        .unwrap();
    assert!(item.is_eligible());

    let recorded = state.last();
    assert_eq!(
        recorded.path,
        "/v1/customers/cust-1/subscriptions/sub-1/transitioneligibilities"
    );
    assert_eq!(recorded.query.as_deref(), Some("eligibilityType=scheduled"));
}

// ---------------------------------------------------------------------------
// Test: availability path is built from the catalog item parts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn availability_uses_catalog_item_segments() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);
    let catalog_item: CatalogItemId = "CFQ7TTC0LF8R:0001:CFQ7TTC0KXG6".parse().unwrap();

    let availability = api.get_availability("cust-1", &catalog_item).await.unwrap();

    assert_eq!(availability.id, "CFQ7TTC0KXG6");
    assert_eq!(availability.terms.len(), 2);
    assert_eq!(availability.terms[1].duration, "P1Y");
    assert!(availability.terms[1].extra.contains_key("cancellationPolicies"));

    assert_eq!(
        state.last().path,
        "/v1/customers/cust-1/products/CFQ7TTC0LF8R/skus/0001/availabilities/CFQ7TTC0KXG6"
    );
}

// ---------------------------------------------------------------------------
// Test: path segments are percent-encoded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn path_segments_are_percent_encoded() {
    let (base_url, state) = start_mock().await;
    let api = client_for(&base_url);

    let subscription = api.get_subscription("cust 1", "sub/1").await.unwrap();

    assert_eq!(subscription.id, "sub/1");
    assert_eq!(
        state.last().path,
        "/v1/customers/cust%201/subscriptions/sub%2F1"
    );
}

// ---------------------------------------------------------------------------
// Test: non-2xx responses surface the service error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_maps_to_api_error() {
    let (base_url, _state) = start_mock().await;
    let api = client_for(&base_url);

    let err = api.get_subscription("cust-1", "missing").await.unwrap_err();

    assert_matches!(
        &err,
        PartnerApiError::Api { status: 404, code: Some(code), description: Some(desc), .. }
            if code == "900" && desc == "Subscription not found"
    );
    assert_eq!(err.status(), Some(404));
}

// ---------------------------------------------------------------------------
// Test: unreachable host is a transport error, not a panic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_host_is_request_error() {
    // Bind then drop to get a port that is almost certainly closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client_for(&format!("http://{addr}"));
    let err = api.get_subscription("cust-1", "sub-1").await.unwrap_err();

    assert_matches!(err, PartnerApiError::Request(_));
}

// ---------------------------------------------------------------------------
// Test: the client works behind the PartnerOperations trait object
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_is_usable_as_trait_object() {
    let (base_url, _state) = start_mock().await;
    let api: Box<dyn PartnerOperations> = Box::new(client_for(&base_url));

    let subscription: Subscription = api.get_subscription("cust-1", "sub-9").await.unwrap();
    assert_eq!(subscription.id, "sub-9");
}
