use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use santia_api::config::CorsOrigins;
use santia_api::state::AppState;
use santia_core::collections;
use santia_storage::error::StorageError;
use santia_storage::memory::MemoryStore;
use santia_storage::store::{Document, DocumentStore};

struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<String, StorageError> {
        Err(StorageError::PutObject("dispatch failure: connection refused".to_string()))
    }

    async fn find(&self, _: &str, _: usize) -> Result<Vec<Document>, StorageError> {
        Err(StorageError::ListObjects("dispatch failure: connection refused".to_string()))
    }
}

struct CorruptStore;

#[async_trait]
impl DocumentStore for CorruptStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<String, StorageError> {
        Ok("unused".to_string())
    }

    async fn find(&self, _: &str, _: usize) -> Result<Vec<Document>, StorageError> {
        Err(santia_storage::store::decode_document("intakes/bad.json", b"{not json").unwrap_err())
    }
}

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = santia_api::app(AppState::new(store.clone()), CorsOrigins::Any.layer());
    (app, store)
}

fn jean_dupont(consent: bool) -> Value {
    json!({
        "category": "sante-sexuelle",
        "symptoms": "Douleurs abdominales",
        "duration": "1-4-semaines",
        "history": "",
        "name": "Jean Dupont",
        "age": 30,
        "gender": "homme",
        "phone": "+237600123456",
        "email": "jean.dupont@example.com",
        "city": "Douala",
        "consent": consent
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_answers_with_and_without_trailing_slash() {
    let (app, _) = test_app();

    for uri in ["/api/", "/api"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello World"}));
    }
}

#[tokio::test]
async fn intake_with_consent_is_recorded_as_pending() {
    let (app, store) = test_app();
    let payload = jean_dupont(true);

    let (status, body) = send(&app, post_json("/api/intake", &payload)).await;
    assert_eq!(status, StatusCode::OK);

    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["status"], "pending");
    assert!(body["created_at"].is_string());
    assert!(body.get("_id").is_none());
    for (field, value) in payload.as_object().unwrap() {
        assert_eq!(&body[field], value, "field {field} changed");
    }
    assert_eq!(store.count(collections::INTAKES).await, 1);
}

#[tokio::test]
async fn intake_without_consent_is_rejected_and_not_stored() {
    let (app, store) = test_app();

    let (status, body) = send(&app, post_json("/api/intake", &jean_dupont(false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Le consentement est requis");
    assert_eq!(store.count(collections::INTAKES).await, 0);

    let (_, listed) = send(&app, get("/api/intakes")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_intakes_are_unprocessable() {
    let (app, store) = test_app();

    let mut bad_email = jean_dupont(true);
    bad_email["email"] = json!("jean.dupont-at-example.com");

    let mut missing_name = jean_dupont(true);
    missing_name.as_object_mut().unwrap().remove("name");

    let mut wrong_age = jean_dupont(true);
    wrong_age["age"] = json!("trente");

    for payload in [bad_email, missing_name, wrong_age] {
        let (status, body) = send(&app, post_json("/api/intake", &payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
        assert!(body["error"].is_string());
    }

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/intake")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(store.count(collections::INTAKES).await, 0);
}

#[tokio::test]
async fn created_intake_appears_in_listing() {
    let (app, _) = test_app();

    let mut payload = jean_dupont(true);
    payload.as_object_mut().unwrap().remove("history");
    let (_, created) = send(&app, post_json("/api/intake", &payload)).await;
    assert_eq!(created["history"], "");

    let (status, listed) = send(&app, get("/api/intakes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn status_checks_round_trip() {
    let (app, _) = test_app();

    let (status, first) =
        send(&app, post_json("/api/status", &json!({"client_name": "test_client"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["client_name"], "test_client");

    let (_, second) =
        send(&app, post_json("/api/status", &json!({"client_name": "test_client"}))).await;
    assert_ne!(first["id"], second["id"]);

    let (status, listed) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);

    let stored = listed.iter().find(|s| s["id"] == first["id"]).unwrap();
    assert_eq!(stored["client_name"], first["client_name"]);
    let created_at: jiff::Timestamp = first["timestamp"].as_str().unwrap().parse().unwrap();
    let listed_at: jiff::Timestamp = stored["timestamp"].as_str().unwrap().parse().unwrap();
    assert_eq!(created_at, listed_at);
}

#[tokio::test]
async fn status_check_requires_client_name() {
    let (app, _) = test_app();

    let (status, _) = send(&app, post_json("/api/status", &json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, post_json("/api/status", &json!({"client_name": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "missing required field: client_name");
}

#[tokio::test]
async fn empty_store_lists_are_empty() {
    let (app, _) = test_app();

    for uri in ["/api/status", "/api/intakes"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn store_outage_is_service_unavailable() {
    let app = santia_api::app(
        AppState::new(Arc::new(UnreachableStore)),
        CorsOrigins::Any.layer(),
    );

    let (status, body) = send(&app, post_json("/api/intake", &jean_dupont(true))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "document store unavailable");

    let (status, _) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Consent is checked before the store is reached.
    let (status, _) = send(&app, post_json("/api/intake", &jean_dupont(false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corrupt_stored_document_is_internal_error() {
    let app = santia_api::app(AppState::new(Arc::new(CorruptStore)), CorsOrigins::Any.layer());

    for uri in ["/api/intakes", "/api/status"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let store = Arc::new(MemoryStore::new());
    let origins = CorsOrigins::parse("https://santia.cm").unwrap();
    let app = santia_api::app(AppState::new(store), origins.layer());

    let req = Request::builder()
        .uri("/api/intakes")
        .header(header::ORIGIN, "https://santia.cm")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://santia.cm"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
