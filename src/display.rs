//! Display fallbacks for denormalized or missing task/user fields.

use crate::model::{Task, User};

pub const UNKNOWN_USER: &str = "Unknown User";

pub fn find_user<'a>(users: &'a [User], id: Option<&str>) -> Option<&'a User> {
    let id = id?;
    users.iter().find(|user| user.id == id)
}

/// Name shown for a task's assignee.
///
/// Denormalized task fields win, then the referenced user's name, then
/// [`UNKNOWN_USER`].
pub fn assigned_user_name(task: &Task, users: &[User]) -> String {
    if let Some(name) = task.user_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }
    find_user(users, task.assigned_user_id.as_deref())
        .map(User::display_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

pub fn assigned_user_avatar(task: &Task, users: &[User]) -> Option<String> {
    task.user_avatar.clone().or_else(|| {
        find_user(users, task.assigned_user_id.as_deref()).and_then(|user| user.avatar.clone())
    })
}

pub fn status_label(completed: bool) -> &'static str {
    if completed {
        "Completed"
    } else {
        "Not Completed"
    }
}

/// Truncates to `max` characters, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}
