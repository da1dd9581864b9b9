use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use roster_server::{router, AppState};
use roster_store::{Database, Store};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> (TempDir, Router) {
    let temp = TempDir::new().expect("temp dir");
    let db = Database::init(temp.path().join("roster.sqlite3")).expect("init db");
    (temp, router(AppState::new(db)))
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().expect("location header").to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    TestResponse {
        status,
        location,
        body,
    }
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/clientes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn create_duplicate_invalid_then_list() {
    let (_temp, app) = app();

    let created = send(
        &app,
        post_json(json!({"nome": "Carlos Silva", "email": "carlos@email.com"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.body,
        json!({"id": 1, "nome": "Carlos Silva", "email": "carlos@email.com"})
    );
    assert_eq!(created.location.as_deref(), Some("/clientes/1"));

    let duplicate = send(
        &app,
        post_json(json!({"nome": "Carlos Silva", "email": "carlos@email.com"})),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body, json!({"message": "Email já cadastrado."}));

    let invalid = send(&app, post_json(json!({"nome": "", "email": ""}))).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        invalid.body,
        json!({
            "message": "Validation failed",
            "errors": {
                "nome": ["Nome é obrigatório."],
                "email": ["Email é obrigatório."]
            }
        })
    );

    let listed = send(&app, get("/clientes")).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(
        listed.body,
        json!([{"id": 1, "nome": "Carlos Silva", "email": "carlos@email.com"}])
    );
}

#[tokio::test]
async fn list_is_empty_array_without_records() {
    let (_temp, app) = app();
    let listed = send(&app, get("/clientes")).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn malformed_email_is_reported_as_invalid() {
    let (_temp, app) = app();
    let response = send(
        &app,
        post_json(json!({"nome": "Carlos", "email": "invalido"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"]["email"], json!(["Email inválido."]));
    assert!(response.body["errors"].get("nome").is_none());
}

#[tokio::test]
async fn whitespace_name_is_required() {
    let (_temp, app) = app();
    let response = send(
        &app,
        post_json(json!({"nome": "   ", "email": "carlos@email.com"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"]["nome"], json!(["Nome é obrigatório."]));
}

#[tokio::test]
async fn missing_fields_are_validation_errors() {
    let (_temp, app) = app();
    let response = send(&app, post_json(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Validation failed");
    assert!(response.body["errors"].get("nome").is_some());
    assert!(response.body["errors"].get("email").is_some());
}

#[tokio::test]
async fn email_is_normalized_before_uniqueness_check() {
    let (_temp, app) = app();

    let created = send(
        &app,
        post_json(json!({"nome": " Carlos ", "email": " Carlos@EMAIL.com "})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["nome"], "Carlos");
    assert_eq!(created.body["email"], "carlos@email.com");

    let duplicate = send(
        &app,
        post_json(json!({"nome": "Carlos", "email": "CARLOS@EMAIL.COM"})),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_yield_one_created_and_one_conflict() {
    let (_temp, app) = app();
    let body = json!({"nome": "Carlos", "email": "carlos@email.com"});

    let (first, second) = tokio::join!(
        send(&app, post_json(body.clone())),
        send(&app, post_json(body.clone())),
    );

    let mut statuses = vec![first.status.as_u16(), second.status.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![201, 409]);

    let conflict = if first.status == StatusCode::CONFLICT {
        &first
    } else {
        &second
    };
    assert_eq!(conflict.body, json!({"message": "Email já cadastrado."}));

    let listed = send(&app, get("/clientes")).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn list_orders_by_id() {
    let (_temp, app) = app();
    for (nome, email) in [
        ("Zélia", "zelia@email.com"),
        ("Ana", "ana@email.com"),
        ("Bruno", "bruno@email.com"),
    ] {
        let response = send(&app, post_json(json!({"nome": nome, "email": email}))).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let listed = send(&app, get("/clientes")).await;
    let ids: Vec<i64> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn location_resolves_to_created_customer() {
    let (_temp, app) = app();
    let created = send(
        &app,
        post_json(json!({"nome": "Ana", "email": "ana@email.com"})),
    )
    .await;
    let location = created.location.expect("location");

    let fetched = send(&app, get(&location)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);

    let missing = send(&app, get("/clientes/42")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, json!({"message": "Cliente não encontrado."}));

    let bad_id = send(&app, get("/clientes/abc")).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (_temp, app) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/clientes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"nome\": "))
        .expect("request");
    let response = send(&app, request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].is_string());

    let wrong_type = send(&app, post_json(json!({"nome": 7, "email": "a@b.com"}))).await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let (temp, app) = app();
    Store::open(&temp.path().join("roster.sqlite3"))
        .expect("open")
        .connection()
        .execute_batch("DROP TABLE customers;")
        .expect("drop table");

    let response = send(
        &app,
        post_json(json!({"nome": "Ana", "email": "ana@email.com"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Internal server error"}));

    let listed = send(&app, get("/clientes")).await;
    assert_eq!(listed.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_ok() {
    let (_temp, app) = app();
    let response = send(&app, get("/health")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"status": "ok"}));
}
