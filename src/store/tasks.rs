use std::fmt;
use std::str::FromStr;

use crate::api::{TaskQuery, TasksApi};
use crate::model::{Task, TaskPayload};
use crate::store::intent::ResourceIntent;
use crate::store::reducer::ResourceReducer;
use crate::store::state::{Filters, Record, ResourceState};

/// Completion filter for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }

    /// All → Completed → Pending → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "pending" | "open" => Ok(StatusFilter::Pending),
            other => Err(format!(
                "unknown status '{}' (expected all, completed or pending)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilters {
    pub search: String,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilterPatch {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
}

impl Filters for TaskFilters {
    type Patch = TaskFilterPatch;

    fn merge(&mut self, patch: TaskFilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type TaskState = ResourceState<Task, TaskFilters>;
pub type TaskIntent = ResourceIntent<Task, TaskFilterPatch>;
pub type TaskReducer = ResourceReducer<Task, TaskFilters>;

pub async fn fetch_tasks(api: &TasksApi, query: &TaskQuery) -> TaskIntent {
    match api.get_all(query).await {
        Ok(tasks) => TaskIntent::ListLoaded(tasks),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn fetch_task(api: &TasksApi, id: &str) -> TaskIntent {
    match api.get_by_id(id).await {
        Ok(task) => TaskIntent::DetailLoaded(task),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn fetch_tasks_by_user(api: &TasksApi, user_id: &str) -> TaskIntent {
    match api.get_by_user(user_id).await {
        Ok(tasks) => TaskIntent::ListLoaded(tasks),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn create_task(api: &TasksApi, payload: &TaskPayload) -> TaskIntent {
    match api.create(payload).await {
        Ok(task) => TaskIntent::Created(task),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn update_task(api: &TasksApi, id: &str, payload: &TaskPayload) -> TaskIntent {
    match api.update(id, payload).await {
        Ok(task) => TaskIntent::Updated(task),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn toggle_task(api: &TasksApi, id: &str, completed: bool) -> TaskIntent {
    match api.toggle_completed(id, completed).await {
        Ok(task) => TaskIntent::Toggled(task),
        Err(err) => TaskIntent::rejected(err),
    }
}

pub async fn delete_task(api: &TasksApi, id: &str) -> TaskIntent {
    match api.delete(id).await {
        Ok(()) => TaskIntent::Deleted(id.to_string()),
        Err(err) => TaskIntent::rejected(err),
    }
}
