//! REST implementation of [`Backend`] over `reqwest`.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{ApiError, Backend, ColumnArgs, LoginResponse, RemoteColumn, RemoteTask, TaskArgs};
use crate::entities::{Column, Task};
use crate::session::Session;

/// HTTP client for the board REST API.
///
/// The bearer token is captured at construction; a client built from a
/// logged-out session sends unauthenticated requests and lets the server
/// reject them.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a client carrying the session's token, if any.
    pub fn with_session(base_url: &str, session: &Session) -> Self {
        Self::new(base_url, session.token().map(str::to_string))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.client.request(method, self.endpoint(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a successful response.
    async fn send_text(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_text(builder).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidData(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.send_json(self.request(Method::POST, "/auth/login").json(&body)).await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<serde_json::Value, ApiError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let text = self.send_text(self.request(Method::POST, "/auth/register").json(&body)).await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidData(e.to_string()))
    }

    async fn fetch_columns(&self) -> Result<Vec<Column>, ApiError> {
        let columns: Vec<RemoteColumn> = self.send_json(self.request(Method::GET, "/columns")).await?;
        Ok(columns.into_iter().map(Column::from).collect())
    }

    async fn create_column(&self, args: ColumnArgs) -> Result<Column, ApiError> {
        let column: RemoteColumn = self.send_json(self.request(Method::POST, "/columns").json(&args)).await?;
        Ok(column.into())
    }

    async fn update_column(&self, id: &str, args: ColumnArgs) -> Result<Column, ApiError> {
        let path = format!("/columns/{id}");
        let column: RemoteColumn = self.send_json(self.request(Method::PUT, &path).json(&args)).await?;
        Ok(column.into())
    }

    async fn delete_column(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/columns/{id}");
        self.send_text(self.request(Method::DELETE, &path)).await.map(|_| ())
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let tasks: Vec<RemoteTask> = self.send_json(self.request(Method::GET, "/tasks")).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, args: TaskArgs) -> Result<Task, ApiError> {
        let task: RemoteTask = self.send_json(self.request(Method::POST, "/tasks").json(&args)).await?;
        Ok(task.into())
    }

    async fn update_task(&self, id: &str, args: TaskArgs) -> Result<Task, ApiError> {
        let path = format!("/tasks/{id}");
        let task: RemoteTask = self.send_json(self.request(Method::PUT, &path).json(&args)).await?;
        Ok(task.into())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/tasks/{id}");
        self.send_text(self.request(Method::DELETE, &path)).await.map(|_| ())
    }
}
