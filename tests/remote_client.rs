//! RemoteClient against an in-process fake FAQ service

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use smartfaq::core::draft::DraftField;
use smartfaq::{Entry, FaqService, Outcome, RemoteClient, ServiceError, Session};

#[derive(Clone, Default)]
struct FakeService {
    entries: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

async fn list(State(fake): State<FakeService>) -> Json<Value> {
    Json(Value::Array(fake.entries.lock().unwrap().clone()))
}

async fn create(State(fake): State<FakeService>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    fake.entries.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "success": true })))
}

async fn remove(State(fake): State<FakeService>, Path(id): Path<String>) -> Json<Value> {
    fake.entries.lock().unwrap().retain(|e| e["id"] != json!(id));
    Json(json!({ "success": true }))
}

async fn answer(State(fake): State<FakeService>, Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    fake.queries.lock().unwrap().push(query);
    Json(json!({
        "answer": "Refunds are issued within 30 days.",
        "sources": [
            {"question": "Q", "answer": "A", "similarity": 0.92},
            {"question": "Q2", "answer": "A2", "similarity": 0.95}
        ],
        "confidence": 0.87,
        "responseTime": 120
    }))
}

async fn analytics() -> Json<Value> {
    Json(json!({
        "feedbackStats": { "avg_rating": null, "total_feedback": 3 },
        "popularQueries": [{ "query": "refund policy", "count": 9, "avg_time": 118.6 }]
    }))
}

fn app(fake: FakeService) -> Router {
    Router::new()
        .route("/api/faqs", get(list).post(create))
        .route("/api/faqs/:id", delete(remove))
        .route("/api/answer", post(answer))
        .route("/api/analytics", get(analytics))
        .with_state(fake)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(url: &str) -> RemoteClient {
    RemoteClient::new(url, Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_entry_lifecycle() {
    let fake = FakeService::default();
    let url = serve(app(fake.clone())).await;
    let client = client(&url);

    assert!(client.list_entries().await.unwrap().is_empty());

    let entry = Entry::new("How do refunds work?", "Within 30 days.");
    client.create_entry(&entry).await.unwrap();

    let stored = fake.entries.lock().unwrap().clone();
    assert_eq!(
        stored,
        vec![json!({
            "id": entry.id,
            "question": "How do refunds work?",
            "answer": "Within 30 days."
        })]
    );
    assert_eq!(client.list_entries().await.unwrap(), vec![entry.clone()]);

    client.delete_entry(&entry.id).await.unwrap();
    assert!(client.list_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_answer_is_parsed_verbatim() {
    let fake = FakeService::default();
    let url = serve(app(fake.clone())).await;

    let result = client(&url).answer("refund policy").await.unwrap();

    assert_eq!(fake.queries.lock().unwrap().clone(), vec!["refund policy"]);
    assert_eq!(result.confidence, Some(0.87));
    assert_eq!(result.response_time, Some(120));
    // Service order kept even though it is not sorted
    assert_eq!(result.sources[0].similarity, Some(0.92));
    assert_eq!(result.sources[1].similarity, Some(0.95));
}

#[tokio::test]
async fn test_analytics_with_missing_fields() {
    let url = serve(app(FakeService::default())).await;

    let snapshot = client(&url).analytics().await.unwrap();

    let stats = snapshot.feedback_stats.clone().unwrap();
    assert_eq!(stats.avg_rating, None);
    assert_eq!(stats.helpful_count, None);
    assert_eq!(stats.total_feedback, Some(3));
    assert_eq!(snapshot.popular_queries()[0].count, 9);
}

#[tokio::test]
async fn test_error_status_carries_message() {
    let app = Router::new().route(
        "/api/faqs",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "KV unavailable" })),
            )
        }),
    );
    let url = serve(app).await;

    let err = client(&url).list_entries().await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            status: 500,
            message: "KV unavailable".into()
        }
    );
}

#[tokio::test]
async fn test_plain_text_error_status() {
    let app = Router::new().route(
        "/api/answer",
        post(|| async { (StatusCode::BAD_REQUEST, "Query required") }),
    );
    let url = serve(app).await;

    let err = client(&url).answer("x").await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            status: 400,
            message: "Query required".into()
        }
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let app = Router::new().route("/api/analytics", get(|| async { "<html>oops</html>" }));
    let url = serve(app).await;

    let err = client(&url).analytics().await.unwrap_err();

    assert!(matches!(err, ServiceError::Malformed(_)));
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .list_entries()
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
    assert!(!err.service_responded());
}

#[tokio::test]
async fn test_session_against_service() {
    let fake = FakeService::default();
    fake.entries
        .lock()
        .unwrap()
        .push(json!({ "id": "1", "question": "Q1", "answer": "A1" }));
    let url = serve(app(fake.clone())).await;
    let session = Session::new(Arc::new(client(&url)));

    let (entries, analytics) = session.start().await;
    assert_eq!(entries, Outcome::Applied);
    assert_eq!(analytics, Outcome::Applied);
    assert_eq!(session.entries().len(), 1);

    session.edit_draft(DraftField::Question, "Shipping time?");
    session.edit_draft(DraftField::Answer, "3-5 business days.");
    session.edit_draft(DraftField::Category, "shipping");
    assert_eq!(session.submit_entry().await, Outcome::Applied);
    assert_eq!(session.entries().len(), 2);
    assert!(session.entries().draft().is_empty());

    assert_eq!(session.remove_entry("1").await, Outcome::Applied);
    let left = session.entries().entries();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].category.as_deref(), Some("shipping"));

    assert_eq!(session.ask("refund policy").await, Outcome::Applied);
    assert_eq!(
        session.probe().result().unwrap().confidence_display(),
        "87.0%"
    );
    assert!(session.take_status().is_empty());
}

#[tokio::test]
async fn test_sparse_answer_still_lands() {
    let app = Router::new().route(
        "/api/answer",
        post(|| async { Json(json!({ "answer": "No matching FAQ found.", "sources": [] })) }),
    );
    let url = serve(app).await;
    let session = Session::new(Arc::new(client(&url)));

    assert_eq!(session.ask("warranty").await, Outcome::Applied);

    let result = session.probe().result().unwrap();
    assert_eq!(result.answer, "No matching FAQ found.");
    assert_eq!(result.confidence_display(), "N/A");
    assert_eq!(result.response_time_display(), "N/A");
    assert!(session.take_status().is_empty());
}
