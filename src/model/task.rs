use serde::{Deserialize, Serialize};

use super::lenient::{self, pick};

/// A task as seen by the dashboard.
///
/// The API may report the same attribute under several spellings; they are
/// merged once at decode time so the rest of the crate sees one field each.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub assigned_user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub priority: Option<String>,
}

impl Task {
    /// Date used for "this week" counting: start date, else creation time.
    pub fn activity_date(&self) -> Option<&str> {
        self.start_date
            .as_deref()
            .or(self.created_at.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawTask {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    completed: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_completed: Option<bool>,
    #[serde(default, rename = "isCompleted", deserialize_with = "lenient::flag")]
    is_completed_camel: Option<bool>,
    #[serde(default, rename = "startDate", deserialize_with = "lenient::string")]
    start_date_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    start_date: Option<String>,
    #[serde(default, rename = "endDate", deserialize_with = "lenient::string")]
    end_date_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    end_date: Option<String>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient::string")]
    created_at_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    created_at: Option<String>,
    #[serde(default, rename = "updatedAt", deserialize_with = "lenient::string")]
    updated_at_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    updated_at: Option<String>,
    #[serde(default, rename = "assignedUserId", deserialize_with = "lenient::string")]
    assigned_user_id_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    assigned_user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    user_name: Option<String>,
    #[serde(default, rename = "userName", deserialize_with = "lenient::string")]
    user_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    user_avatar: Option<String>,
    #[serde(default, rename = "userAvatar", deserialize_with = "lenient::string")]
    user_avatar_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    priority: Option<String>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let completed = [raw.completed, raw.is_completed, raw.is_completed_camel]
            .into_iter()
            .any(|flag| flag.unwrap_or(false));

        Task {
            id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            completed,
            start_date: pick(raw.start_date_camel, raw.start_date),
            end_date: pick(raw.end_date_camel, raw.end_date),
            created_at: pick(raw.created_at_camel, raw.created_at),
            updated_at: pick(raw.updated_at_camel, raw.updated_at),
            assigned_user_id: pick(raw.assigned_user_id_camel, raw.assigned_user_id),
            user_name: pick(raw.user_name, raw.user_name_camel),
            user_avatar: pick(raw.user_avatar, raw.user_avatar_camel),
            priority: pick(raw.priority, None),
        }
    }
}

/// Body sent on task create (POST) and full update (PUT).
///
/// Timestamps are owned by the server and never sent. The completion flag
/// is written under every spelling the API reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(into = "WirePayload")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assigned_user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    title: String,
    description: String,
    #[serde(flatten)]
    completion: CompletionFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    assigned_user_id: String,
}

impl From<TaskPayload> for WirePayload {
    fn from(payload: TaskPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completion: CompletionFlags::new(payload.completed),
            start_date: payload.start_date,
            end_date: payload.end_date,
            assigned_user_id: payload.assigned_user_id,
        }
    }
}

/// `completed`, `is_completed` and `isCompleted`, always equal.
#[derive(Serialize)]
struct CompletionFlags {
    completed: bool,
    is_completed: bool,
    #[serde(rename = "isCompleted")]
    is_completed_camel: bool,
}

impl CompletionFlags {
    fn new(completed: bool) -> Self {
        Self {
            completed,
            is_completed: completed,
            is_completed_camel: completed,
        }
    }
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            start_date: task.start_date.clone(),
            end_date: task.end_date.clone(),
            assigned_user_id: task.assigned_user_id.clone().unwrap_or_default(),
        }
    }
}

/// Partial update body (PATCH). Only set fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(into = "WirePatch")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assigned_user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    completion: Option<CompletionFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_user_id: Option<String>,
}

impl From<TaskPatch> for WirePatch {
    fn from(patch: TaskPatch) -> Self {
        Self {
            title: patch.title,
            description: patch.description,
            completion: patch.completed.map(CompletionFlags::new),
            start_date: patch.start_date,
            end_date: patch.end_date,
            assigned_user_id: patch.assigned_user_id,
        }
    }
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}
