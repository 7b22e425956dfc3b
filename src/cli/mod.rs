//! Scriptable subcommands over the same API, stores and helpers the
//! dashboard uses.

mod args;
mod print;

pub use args::{
    Cli, Command, PageArgs, TaskCommand, TaskFieldArgs, TaskListArgs, UserCommand, UserFieldArgs,
};

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::api::{Api, TaskQuery, UserQuery};
use crate::config::Config;
use crate::export::{export_file_name, task_sheet, user_sheet};
use crate::forms::{TaskForm, UserForm};
use crate::model::{Task, User};
use crate::mvi::dispatch;
use crate::query::{filter_tasks, filter_users, paginate};
use crate::stats::TaskStats;
use crate::store::{
    tasks, users, Filters, Record, ResourceIntent, ResourceReducer, ResourceState, TaskFilterPatch,
    TaskIntent, TaskReducer, TaskState, UserFilterPatch, UserIntent, UserReducer, UserState,
};

/// Runs one non-interactive command. Returns `false` when the command
/// completed but reports failure (an unreachable API for `health`).
pub async fn run(
    command: Command,
    config: &Config,
    api: &Api,
    out: &mut impl Write,
) -> Result<bool> {
    match command {
        Command::Tui => bail!("the interactive dashboard cannot run as a scripted command"),
        Command::Dashboard => dashboard(api, out).await.map(|()| true),
        Command::Tasks(command) => run_tasks(command, config, api, out).await.map(|()| true),
        Command::Users(command) => run_users(command, config, api, out).await.map(|()| true),
        Command::Health => {
            let base_url = &api.client.settings().base_url;
            if api.check_connection().await {
                writeln!(out, "API reachable at {base_url}")?;
                Ok(true)
            } else {
                writeln!(out, "API unreachable at {base_url}")?;
                Ok(false)
            }
        }
    }
}

async fn dashboard(api: &Api, out: &mut impl Write) -> Result<()> {
    let (task_intent, user_intent) = fetch_tasks_and_users(api).await;
    let mut task_state = TaskState::default();
    let mut user_state = UserState::default();
    settle(&mut task_state, task_intent).context("Failed to load tasks")?;
    settle(&mut user_state, user_intent).context("Failed to load users")?;

    let stats = TaskStats::calculate(&task_state.items, today());
    print::stats(out, &stats, user_state.items.len())?;
    Ok(())
}

async fn run_tasks(
    command: TaskCommand,
    config: &Config,
    api: &Api,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        TaskCommand::List(args) => {
            let (task_intent, user_intent) = fetch_tasks_and_users(api).await;
            let page_size = args.page.page_size.unwrap_or(config.ui.page_size);
            let mut state = TaskState::with_page_size(page_size);
            settle(&mut state, task_intent).context("Failed to load tasks")?;
            // The assignee column degrades to "Unknown User" without users.
            let users = users_or_empty(user_intent);

            dispatch::<TaskReducer>(
                &mut state,
                TaskIntent::SetFilters(TaskFilterPatch {
                    search: args.page.search,
                    status: Some(args.status),
                }),
            );
            dispatch::<TaskReducer>(&mut state, TaskIntent::SetPage(args.page.page));

            let filtered = filter_tasks(&state.items, &state.filters);
            let page = paginate(&filtered, state.page, state.page_size);
            print::task_page(out, &page, &users)?;
        }
        TaskCommand::Show { id } => {
            let task = record(tasks::fetch_task(&api.tasks, &id).await)
                .context("Failed to load task")?;
            let users = load_users_quietly(api).await;
            print::task_detail(out, &task, &users)?;
        }
        TaskCommand::Add(fields) => {
            let mut form = TaskForm::new(today());
            apply_task_fields(&mut form, fields);
            let payload = form.validate()?;
            let task = record(tasks::create_task(&api.tasks, &payload).await)
                .context("Failed to create task")?;
            writeln!(out, "Task created successfully (#{})", task.id)?;
        }
        TaskCommand::Edit { id, fields } => {
            let current = record(tasks::fetch_task(&api.tasks, &id).await)
                .context("Failed to load task")?;
            let mut form = TaskForm::from_task(&current, today());
            apply_task_fields(&mut form, fields);
            let payload = form.validate()?;
            record(tasks::update_task(&api.tasks, &id, &payload).await)
                .context("Failed to update task")?;
            writeln!(out, "Task updated successfully")?;
        }
        TaskCommand::Toggle { id } => {
            let current = record(tasks::fetch_task(&api.tasks, &id).await)
                .context("Failed to load task")?;
            let task = record(tasks::toggle_task(&api.tasks, &id, !current.completed).await)
                .context("Failed to update task status")?;
            if task.completed {
                writeln!(out, "Task marked as completed")?;
            } else {
                writeln!(out, "Task marked as pending")?;
            }
        }
        TaskCommand::Delete { id } => {
            let mut state = TaskState::default();
            settle(&mut state, tasks::delete_task(&api.tasks, &id).await)
                .context("Failed to delete task")?;
            writeln!(out, "Task deleted successfully")?;
        }
        TaskCommand::Export { search, status, out: dir } => {
            let (task_intent, user_intent) = fetch_tasks_and_users(api).await;
            let mut state = TaskState::default();
            settle(&mut state, task_intent).context("Failed to load tasks")?;
            let users = users_or_empty(user_intent);
            dispatch::<TaskReducer>(
                &mut state,
                TaskIntent::SetFilters(TaskFilterPatch {
                    search,
                    status: Some(status),
                }),
            );

            let filtered = filter_tasks(&state.items, &state.filters);
            let sheet = task_sheet(&filtered, &users);
            let path = sheet
                .save(&export_dir(config, dir), &export_file_name("tasks", today()))
                .context("Export Failed")?;
            info!(path = %path.display(), "tasks exported");
            writeln!(out, "{} tasks exported to {}", filtered.len(), path.display())?;
        }
        TaskCommand::ByUser { user_id } => {
            let mut state = TaskState::default();
            settle(&mut state, tasks::fetch_tasks_by_user(&api.tasks, &user_id).await)
                .context("Failed to load tasks")?;
            let users = load_users_quietly(api).await;
            let all: Vec<&Task> = state.items.iter().collect();
            let page = paginate(&all, 1, all.len().max(1));
            print::task_page(out, &page, &users)?;
        }
    }
    Ok(())
}

async fn run_users(
    command: UserCommand,
    config: &Config,
    api: &Api,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        UserCommand::List(args) => {
            let page_size = args.page_size.unwrap_or(config.ui.page_size);
            let mut state = UserState::with_page_size(page_size);
            settle(&mut state, users::fetch_users(&api.users, &UserQuery::default()).await)
                .context("Failed to load users")?;
            dispatch::<UserReducer>(
                &mut state,
                UserIntent::SetFilters(UserFilterPatch { search: args.search }),
            );
            dispatch::<UserReducer>(&mut state, UserIntent::SetPage(args.page));

            let filtered = filter_users(&state.items, &state.filters.search);
            let page = paginate(&filtered, state.page, state.page_size);
            print::user_page(out, &page)?;
        }
        UserCommand::Show { id } => {
            let user = record(users::fetch_user(&api.users, &id).await)
                .context("Failed to load user")?;
            print::user_detail(out, &user)?;
        }
        UserCommand::Add(fields) => {
            let mut form = UserForm::default();
            apply_user_fields(&mut form, fields);
            let payload = form.validate()?;
            let user = record(users::create_user(&api.users, &payload).await)
                .context("Failed to create user")?;
            writeln!(out, "User created successfully (#{})", user.id)?;
        }
        UserCommand::Edit { id, fields } => {
            let current = record(users::fetch_user(&api.users, &id).await)
                .context("Failed to load user")?;
            let mut form = UserForm::from_user(&current);
            apply_user_fields(&mut form, fields);
            let payload = form.validate()?;
            record(users::update_user(&api.users, &id, &payload).await)
                .context("Failed to update user")?;
            writeln!(out, "User updated successfully")?;
        }
        UserCommand::Delete { id } => {
            let mut state = UserState::default();
            settle(&mut state, users::delete_user(&api.users, &id).await)
                .context("Failed to delete user")?;
            writeln!(out, "User deleted successfully")?;
        }
        UserCommand::Export { search, out: dir } => {
            let mut state = UserState::default();
            settle(&mut state, users::fetch_users(&api.users, &UserQuery::default()).await)
                .context("Failed to load users")?;
            let filtered = filter_users(&state.items, search.as_deref().unwrap_or_default());
            let path = user_sheet(&filtered)
                .save(&export_dir(config, dir), &export_file_name("users", today()))
                .context("Export Failed")?;
            info!(path = %path.display(), "users exported");
            writeln!(out, "{} users exported to {}", filtered.len(), path.display())?;
        }
        UserCommand::Search { term } => {
            let mut state = UserState::default();
            settle(&mut state, users::search_users(&api.users, &term).await)
                .context("Failed to search users")?;
            let all: Vec<_> = state.items.iter().collect();
            let page = paginate(&all, 1, all.len().max(1));
            print::user_page(out, &page)?;
        }
    }
    Ok(())
}

/// Applies `intent` and turns a rejection into an error.
fn settle<T: Record, F: Filters>(
    state: &mut ResourceState<T, F>,
    intent: ResourceIntent<T, F::Patch>,
) -> Result<()> {
    dispatch::<ResourceReducer<T, F>>(state, intent);
    match state.error.take() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

/// The record carried by a fulfilled single-record intent.
fn record<T, P>(intent: ResourceIntent<T, P>) -> Result<T> {
    match intent {
        ResourceIntent::DetailLoaded(item)
        | ResourceIntent::Created(item)
        | ResourceIntent::Updated(item)
        | ResourceIntent::Toggled(item) => Ok(item),
        ResourceIntent::Rejected(message) => Err(anyhow!(message)),
        _ => bail!("unexpected response"),
    }
}

/// Fetches both lists concurrently.
async fn fetch_tasks_and_users(api: &Api) -> (TaskIntent, UserIntent) {
    let task_query = TaskQuery::default();
    let user_query = UserQuery::default();
    tokio::join!(
        tasks::fetch_tasks(&api.tasks, &task_query),
        users::fetch_users(&api.users, &user_query),
    )
}

/// Users for assignee lookups; a failed fetch is logged and yields none.
fn users_or_empty(intent: UserIntent) -> Vec<User> {
    let mut state = UserState::default();
    match settle(&mut state, intent) {
        Ok(()) => state.items,
        Err(err) => {
            warn!(error = %err, "users unavailable, assignees shown as unknown");
            Vec::new()
        }
    }
}

async fn load_users_quietly(api: &Api) -> Vec<User> {
    let query = UserQuery::default();
    users_or_empty(users::fetch_users(&api.users, &query).await)
}

fn apply_task_fields(form: &mut TaskForm, fields: TaskFieldArgs) {
    let TaskFieldArgs {
        title,
        description,
        assigned_user_id,
        start_date,
        end_date,
        completed,
    } = fields;
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(user) = assigned_user_id {
        form.assigned_user_id = user;
    }
    if let Some(start) = start_date {
        form.start_date = start;
    }
    if let Some(end) = end_date {
        form.end_date = end;
    }
    if let Some(completed) = completed {
        form.completed = completed;
    }
}

fn apply_user_fields(form: &mut UserForm, fields: UserFieldArgs) {
    let UserFieldArgs {
        first_name,
        last_name,
        email,
        avatar,
    } = fields;
    if let Some(first_name) = first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        form.last_name = last_name;
    }
    if let Some(email) = email {
        form.email = email;
    }
    if let Some(avatar) = avatar {
        form.avatar = avatar;
    }
}

fn export_dir(config: &Config, flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| config.export.directory.as_deref().map(PathBuf::from))
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
