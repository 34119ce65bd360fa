//! Scripted in-memory `Backend` shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use taskboard::backend::{ApiError, Backend, ColumnArgs, LoginResponse, TaskArgs};
use taskboard::board::BoardStore;
use taskboard::entities::{Column, Task};

#[derive(Default)]
struct MockState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    calls: Vec<String>,
    fail_with: Option<ApiError>,
    fail_tasks_fetch: bool,
    next_id: u32,
}

/// Server double: records every call and can be switched to reject them.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn task(id: &str, title: &str, description: &str, column_id: &str, day: u32) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        column_id: column_id.to_string(),
        user_id: "u1".to_string(),
        created_at: at(day),
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        let mock = Self::new();
        {
            let mut state = mock.state.lock().unwrap();
            state.columns = columns;
            state.tasks = tasks;
        }
        mock
    }

    /// Reject every following call with `error`.
    pub fn fail_with(&self, error: ApiError) {
        self.state.lock().unwrap().fail_with = Some(error);
    }

    /// Only the task listing fails; columns still load.
    pub fn fail_tasks_fetch(&self) {
        self.state.lock().unwrap().fail_tasks_fetch = true;
    }

    pub fn recover(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_with = None;
        state.fail_tasks_fetch = false;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// A board store already loaded from this backend.
    pub async fn loaded_store(&self) -> BoardStore {
        let mut store = BoardStore::new(Arc::new(self.clone()));
        store.load().await.unwrap();
        self.clear_calls();
        store
    }

    fn record(&self, call: String) -> Result<std::sync::MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.record(format!("login {email}"))?;
        Ok(LoginResponse {
            token: "token".to_string(),
            user_id: "u1".to_string(),
        })
    }

    async fn register(&self, _name: &str, email: &str, _password: &str) -> Result<serde_json::Value, ApiError> {
        self.record(format!("register {email}"))?;
        Ok(serde_json::Value::Null)
    }

    async fn fetch_columns(&self) -> Result<Vec<Column>, ApiError> {
        let state = self.record("fetch_columns".to_string())?;
        Ok(state.columns.clone())
    }

    async fn create_column(&self, args: ColumnArgs) -> Result<Column, ApiError> {
        let mut state = self.record(format!("create_column {} {}", args.title, args.order))?;
        state.next_id += 1;
        let column = Column::new(format!("col-{}", state.next_id), args.title, args.order);
        state.columns.push(column.clone());
        Ok(column)
    }

    async fn update_column(&self, id: &str, args: ColumnArgs) -> Result<Column, ApiError> {
        let mut state = self.record(format!("update_column {id} {} {}", args.title, args.order))?;
        let column = Column::new(id, args.title, args.order);
        if let Some(slot) = state.columns.iter_mut().find(|c| c.id == id) {
            *slot = column.clone();
        }
        Ok(column)
    }

    async fn delete_column(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.record(format!("delete_column {id}"))?;
        state.columns.retain(|c| c.id != id);
        state.tasks.retain(|t| t.column_id != id);
        Ok(())
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let state = self.record("fetch_tasks".to_string())?;
        if state.fail_tasks_fetch {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, args: TaskArgs) -> Result<Task, ApiError> {
        let mut state = self.record(format!("create_task {} {}", args.title, args.column_id))?;
        state.next_id += 1;
        let task = Task {
            id: format!("task-{}", state.next_id),
            title: args.title,
            description: args.description,
            column_id: args.column_id,
            user_id: "u1".to_string(),
            created_at: at(28),
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, args: TaskArgs) -> Result<Task, ApiError> {
        let mut state = self.record(format!("update_task {id} {}", args.column_id))?;
        let Some(slot) = state.tasks.iter_mut().find(|t| t.id == id) else {
            return Err(ApiError::NotFound("Task not found".to_string()));
        };
        slot.title = args.title;
        slot.description = args.description;
        slot.column_id = args.column_id;
        Ok(slot.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.record(format!("delete_task {id}"))?;
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }
}
