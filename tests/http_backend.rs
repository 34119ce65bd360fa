use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use taskboard::backend::{ApiError, Backend, ColumnArgs, HttpBackend, TaskArgs};

/// One request as the server saw it
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
    fn requests(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }
}

async fn api(State(recorder): State<Recorder>, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    recorder.0.lock().unwrap().push(Seen {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let path = uri.path().trim_start_matches("/api");
    if path.starts_with("/auth/") {
        return match path {
            "/auth/login" if body.contains("\"correct horse\"") => {
                Json(json!({"token": "abc", "userId": "u1"})).into_response()
            }
            "/auth/login" => (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))).into_response(),
            _ => (StatusCode::CREATED, Json(json!({"message": "User registered"}))).into_response(),
        };
    }
    if authorization.is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "No token provided"}))).into_response();
    }

    match (method.as_str(), path) {
        ("GET", "/columns") => Json(json!([
            {"_id": "c1", "title": "Todo", "order": 0, "user": "u1"},
            {"_id": "c2", "title": "Done", "order": 1, "user": "u1"}
        ]))
        .into_response(),
        ("PUT", "/columns/c1") => {
            let args: Value = serde_json::from_str(&body).unwrap();
            Json(json!({"_id": "c1", "title": args["title"], "order": args["order"]})).into_response()
        }
        ("GET", "/tasks") => Json(json!([
            {
                "_id": "t1", "title": "Buy milk", "description": "2L",
                "column": {"_id": "c1", "title": "Todo", "order": 0},
                "user": "u1", "createdAt": "2024-01-01T10:00:00.000Z"
            },
            {
                "_id": "t2", "title": "Eggs",
                "column": "c2",
                "user": "u1", "createdAt": "2024-01-02T10:00:00.000Z"
            }
        ]))
        .into_response(),
        ("POST", "/tasks") => {
            let args: Value = serde_json::from_str(&body).unwrap();
            (
                StatusCode::CREATED,
                Json(json!({
                    "_id": "t9",
                    "title": args["title"],
                    "description": args["description"],
                    "column": args["columnId"],
                    "user": "u1",
                    "createdAt": "2024-02-01T00:00:00Z"
                })),
            )
                .into_response()
        }
        ("PUT", "/tasks/missing") => {
            (StatusCode::NOT_FOUND, Json(json!({"message": "Task not found"}))).into_response()
        }
        ("DELETE", "/tasks/t1") => StatusCode::NO_CONTENT.into_response(),
        ("DELETE", _) => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_server() -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new().fallback(api).with_state(recorder.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}/api/"), recorder)
}

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let (url, recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, Some("abc".to_string()));

    let columns = backend.fetch_columns().await.unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1].title, "Done");

    let seen = recorder.requests();
    assert_eq!(seen[0].path, "/api/columns");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (url, recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, None);
    assert!(!backend.is_authenticated());

    let err = backend.fetch_tasks().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized("No token provided".to_string()));
    assert!(err.is_auth());
    assert_eq!(recorder.requests()[0].authorization, None);
}

#[tokio::test]
async fn test_tasks_normalize_column_reference() {
    let (url, _recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, Some("abc".to_string()));

    let tasks = backend.fetch_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].column_id, "c1");
    assert_eq!(tasks[0].description, "2L");
    assert_eq!(tasks[1].column_id, "c2");
    assert_eq!(tasks[1].description, "");
}

#[tokio::test]
async fn test_create_task_sends_camel_case_body() {
    let (url, recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, Some("abc".to_string()));

    let task = backend
        .create_task(TaskArgs {
            title: "Call mom".to_string(),
            description: String::new(),
            column_id: "c2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(task.id, "t9");
    assert_eq!(task.column_id, "c2");

    let seen = recorder.requests();
    assert_eq!(seen[0].method, Method::POST);
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({"title": "Call mom", "description": "", "columnId": "c2"}));
}

#[tokio::test]
async fn test_update_column_round_trip() {
    let (url, recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, Some("abc".to_string()));

    let column = backend
        .update_column(
            "c1",
            ColumnArgs {
                title: "Backlog".to_string(),
                order: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(column.title, "Backlog");
    assert_eq!(column.order, 3);
    assert_eq!(recorder.requests()[0].method, Method::PUT);
    assert_eq!(recorder.requests()[0].path, "/api/columns/c1");
}

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let (url, _recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, Some("abc".to_string()));

    let missing = backend
        .update_task(
            "missing",
            TaskArgs {
                title: "A".to_string(),
                description: String::new(),
                column_id: "c1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(missing, ApiError::NotFound("Task not found".to_string()));

    backend.delete_task("t1").await.unwrap();

    let failed = backend.delete_column("c1").await.unwrap_err();
    assert_eq!(
        failed,
        ApiError::Status {
            status: 500,
            message: "database unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_login_and_register() {
    let (url, recorder) = spawn_server().await;
    let backend = HttpBackend::new(&url, None);

    let login = backend.login("a@b.c", "correct horse").await.unwrap();
    assert_eq!(login.token, "abc");
    assert_eq!(login.user_id, "u1");

    let rejected = backend.login("a@b.c", "wrong").await.unwrap_err();
    assert!(rejected.is_auth());

    let registered = backend.register("Ann", "a@b.c", "pw").await.unwrap();
    assert_eq!(registered["message"], "User registered");

    let paths: Vec<String> = recorder.requests().into_iter().map(|seen| seen.path).collect();
    assert_eq!(paths, vec!["/api/auth/login", "/api/auth/login", "/api/auth/register"]);
}

#[tokio::test]
async fn test_network_failure_maps_to_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(&format!("http://{addr}/api"), Some("abc".to_string()));
    assert!(matches!(backend.fetch_columns().await, Err(ApiError::Network(_))));
}
