//! Gateway tests against a recording stand-in for the REST backend.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use invq_core::{InvoiceRecord, InvoiceStatus};
use invq_datastore::{Datastore, DatastoreConfig, DatastoreError, ProcessingStatus, RestDatastore};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    apikey: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Backend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
}

async fn record(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    backend.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        apikey: header("apikey"),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    (backend.status, r#"{"message":"recorded"}"#)
}

/// Start a backend answering every request with `status`.
async fn start_backend(status: StatusCode) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let backend = Backend {
        requests: requests.clone(),
        status,
    };
    let app = Router::new().fallback(record).with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

fn datastore(base: &str) -> RestDatastore {
    RestDatastore::new(DatastoreConfig::new(base, "service-key"))
}

fn invoice() -> InvoiceRecord {
    InvoiceRecord {
        user_id: "user-1".to_string(),
        vendor_name: "Acme".to_string(),
        invoice_number: "INV-1".to_string(),
        invoice_date: "2024-03-01".to_string(),
        due_date: None,
        amount: 42.5,
        status: InvoiceStatus::Pending,
    }
}

#[tokio::test]
async fn test_update_queue_status_request() {
    let (base, requests) = start_backend(StatusCode::OK).await;

    let ok = datastore(&base)
        .update_queue_status("q-1", ProcessingStatus::Processing, None)
        .await
        .unwrap();
    assert!(ok);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/rest/v1/processing_queue");
    assert_eq!(request.query.as_deref(), Some("id=eq.q-1"));
    assert_eq!(request.apikey.as_deref(), Some("service-key"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer service-key"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        request.body,
        json!({"status": "processing", "error_message": null})
    );
}

#[tokio::test]
async fn test_update_attachment_status_sets_processed() {
    let (base, requests) = start_backend(StatusCode::OK).await;
    let store = datastore(&base);

    store
        .update_attachment_status("att-9", ProcessingStatus::Completed, None)
        .await
        .unwrap();
    store
        .update_attachment_status("att-9", ProcessingStatus::Error, Some("bad pdf"))
        .await
        .unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].path, "/rest/v1/email_attachments");
    assert_eq!(requests[0].query.as_deref(), Some("id=eq.att-9"));
    assert_eq!(
        requests[0].body,
        json!({"processing_status": "completed", "processing_error": null, "processed": true})
    );
    assert_eq!(
        requests[1].body,
        json!({"processing_status": "error", "processing_error": "bad pdf", "processed": false})
    );
}

#[tokio::test]
async fn test_create_invoice_request() {
    let (base, requests) = start_backend(StatusCode::CREATED).await;

    let ok = datastore(&base).create_invoice(&invoice()).await.unwrap();
    assert!(ok);

    let requests = requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/rest/v1/invoices");
    assert_eq!(request.query, None);
    assert_eq!(
        request.body,
        json!({
            "user_id": "user-1",
            "vendor_name": "Acme",
            "invoice_number": "INV-1",
            "invoice_date": "2024-03-01",
            "due_date": null,
            "amount": 42.5,
            "status": "pending",
        })
    );
}

#[tokio::test]
async fn test_insert_needs_created() {
    let (base, _requests) = start_backend(StatusCode::OK).await;

    let ok = datastore(&base).create_invoice(&invoice()).await.unwrap();
    assert!(!ok);
}

#[tokio::test]
async fn test_update_needs_ok() {
    let (base, _requests) = start_backend(StatusCode::NO_CONTENT).await;

    let ok = datastore(&base)
        .update_queue_status("q-1", ProcessingStatus::Completed, None)
        .await
        .unwrap();
    assert!(!ok);

    let (base, _requests) = start_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
    let ok = datastore(&base)
        .update_attachment_status("att-1", ProcessingStatus::Completed, None)
        .await
        .unwrap();
    assert!(!ok);
}

#[tokio::test]
async fn test_trailing_slash_trimmed() {
    let (base, requests) = start_backend(StatusCode::OK).await;

    datastore(&format!("{}///", base))
        .update_queue_status("q-2", ProcessingStatus::Error, Some("boom"))
        .await
        .unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].path, "/rest/v1/processing_queue");
    assert_eq!(
        requests[0].body,
        json!({"status": "error", "error_message": "boom"})
    );
}

#[tokio::test]
async fn test_transport_failure_is_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = datastore(&format!("http://{}", addr))
        .update_queue_status("q-1", ProcessingStatus::Processing, None)
        .await
        .unwrap_err();

    assert!(matches!(err, DatastoreError::Transport(_)));
}
