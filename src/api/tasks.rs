use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::model::{Task, TaskPatch, TaskPayload};

const ENDPOINT: &str = "/tasks";

/// Server-side list parameters. The mock API may ignore any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub search: Option<String>,
    pub completed: Option<bool>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl TaskQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(completed) = self.completed {
            params.push(("completed", completed.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        params
    }
}

/// Typed access to `/tasks`.
#[derive(Debug, Clone)]
pub struct TasksApi {
    client: ApiClient,
}

impl TasksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.client.get_all(ENDPOINT, &query.to_params()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Task, ApiError> {
        self.client.get_by_id(ENDPOINT, id).await
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Vec<Task>, ApiError> {
        self.client
            .get_all(ENDPOINT, &[("assignedUserId", user_id.to_string())])
            .await
    }

    pub async fn create(&self, payload: &TaskPayload) -> Result<Task, ApiError> {
        if payload.title.trim().is_empty() {
            return Err(ApiError::InvalidArgument("Task title is required".to_string()));
        }
        if payload.assigned_user_id.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "Assigned user is required".to_string(),
            ));
        }
        self.client.create(ENDPOINT, payload).await
    }

    pub async fn update(&self, id: &str, payload: &TaskPayload) -> Result<Task, ApiError> {
        self.client.update(ENDPOINT, id, payload).await
    }

    pub async fn patch(&self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::InvalidArgument(
                "Data is required for patch".to_string(),
            ));
        }
        self.client.patch(ENDPOINT, id, patch).await
    }

    pub async fn toggle_completed(&self, id: &str, completed: bool) -> Result<Task, ApiError> {
        let patch = TaskPatch {
            completed: Some(completed),
            ..TaskPatch::default()
        };
        self.client.patch(ENDPOINT, id, &patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(ENDPOINT, id).await
    }
}
