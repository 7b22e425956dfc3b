//! Runs API calls off the UI thread.
//!
//! The UI sends [`UiCommand`]s over a tokio channel; every command is
//! executed on its own task and its outcome comes back as an [`AppEvent`]
//! on the UI event channel, in completion order.

use std::sync::mpsc;

use tokio::runtime::Handle;
use tokio::sync::mpsc as async_mpsc;
use tracing::debug;

use crate::api::{Api, TaskQuery, UserQuery};
use crate::model::{TaskPayload, UserPayload};
use crate::store::{tasks, users};
use crate::ui::events::AppEvent;

const COMMAND_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    FetchTasks,
    CreateTask(TaskPayload),
    UpdateTask { id: String, payload: TaskPayload },
    ToggleTask { id: String, completed: bool },
    DeleteTask { id: String },
    FetchUsers,
    CreateUser(UserPayload),
    UpdateUser { id: String, payload: UserPayload },
    DeleteUser { id: String },
    CheckHealth,
}

pub type UiCommandSender = async_mpsc::Sender<UiCommand>;

/// Which request produced a store outcome; selects the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOp {
    Fetch,
    Create,
    Update,
    /// Carries the requested completion state.
    Toggle(bool),
    Delete,
}

/// Spawns the command loop on `handle` and returns its sender.
pub fn spawn_worker(handle: &Handle, api: Api, events: mpsc::Sender<AppEvent>) -> UiCommandSender {
    let (tx, mut rx) = async_mpsc::channel::<UiCommand>(COMMAND_BUFFER);
    let spawner = handle.clone();
    handle.spawn(async move {
        while let Some(command) = rx.recv().await {
            let api = api.clone();
            let events = events.clone();
            spawner.spawn(async move {
                let event = execute(&api, command).await;
                let _ = events.send(event);
            });
        }
        debug!("command channel closed");
    });
    tx
}

/// Performs one command against the API.
pub async fn execute(api: &Api, command: UiCommand) -> AppEvent {
    debug!(?command, "executing command");
    match command {
        UiCommand::FetchTasks => AppEvent::Tasks {
            op: ResourceOp::Fetch,
            intent: tasks::fetch_tasks(&api.tasks, &TaskQuery::default()).await,
        },
        UiCommand::CreateTask(payload) => AppEvent::Tasks {
            op: ResourceOp::Create,
            intent: tasks::create_task(&api.tasks, &payload).await,
        },
        UiCommand::UpdateTask { id, payload } => AppEvent::Tasks {
            op: ResourceOp::Update,
            intent: tasks::update_task(&api.tasks, &id, &payload).await,
        },
        UiCommand::ToggleTask { id, completed } => AppEvent::Tasks {
            op: ResourceOp::Toggle(completed),
            intent: tasks::toggle_task(&api.tasks, &id, completed).await,
        },
        UiCommand::DeleteTask { id } => AppEvent::Tasks {
            op: ResourceOp::Delete,
            intent: tasks::delete_task(&api.tasks, &id).await,
        },
        UiCommand::FetchUsers => AppEvent::Users {
            op: ResourceOp::Fetch,
            intent: users::fetch_users(&api.users, &UserQuery::default()).await,
        },
        UiCommand::CreateUser(payload) => AppEvent::Users {
            op: ResourceOp::Create,
            intent: users::create_user(&api.users, &payload).await,
        },
        UiCommand::UpdateUser { id, payload } => AppEvent::Users {
            op: ResourceOp::Update,
            intent: users::update_user(&api.users, &id, &payload).await,
        },
        UiCommand::DeleteUser { id } => AppEvent::Users {
            op: ResourceOp::Delete,
            intent: users::delete_user(&api.users, &id).await,
        },
        UiCommand::CheckHealth => AppEvent::Health(api.check_connection().await),
    }
}
