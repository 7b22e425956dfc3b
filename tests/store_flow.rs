//! Thunks, reducer and worker against the mock API.

mod common;

use common::{api_for, list, task_json, user_json, MockApi, MockResponse};
use deskboard::api::UserQuery;
use deskboard::config::Config;
use deskboard::mvi::dispatch;
use deskboard::store::{tasks, users, TaskIntent, TaskReducer, TaskState, UserIntent};
use deskboard::ui::app::{App, Screen};
use deskboard::ui::events::AppEvent;
use deskboard::ui::worker::{execute, ResourceOp, UiCommand};

#[tokio::test]
async fn fetched_users_get_derived_profile() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&list(&[user_json("1", "Grace", "Hopper")])))
        .await;

    let intent = users::fetch_users(&api_for(&mock).users, &UserQuery::default()).await;

    let UserIntent::ListLoaded(users) = intent else {
        panic!("expected list, got {intent:?}");
    };
    assert_eq!(users[0].name.as_deref(), Some("Grace Hopper"));
    assert_eq!(users[0].email.as_deref(), Some("grace.hopper@example.com"));
}

#[tokio::test]
async fn rejected_delete_keeps_list_and_sets_error() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&list(&[
        task_json("1", "a", false, "1"),
        task_json("2", "b", true, "1"),
    ])))
    .await;
    mock.enqueue(MockResponse::error(404, "gone")).await;
    let api = api_for(&mock);

    let mut state = TaskState::default();
    dispatch::<TaskReducer>(&mut state, TaskIntent::Pending);
    let loaded = tasks::fetch_tasks(&api.tasks, &Default::default()).await;
    dispatch::<TaskReducer>(&mut state, loaded);
    dispatch::<TaskReducer>(&mut state, TaskIntent::Pending);
    let deleted = tasks::delete_task(&api.tasks, "2").await;
    assert!(deleted.is_rejected());
    dispatch::<TaskReducer>(&mut state, deleted);

    assert_eq!(state.items.len(), 2);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Resource not found"));
}

#[tokio::test]
async fn toggle_updates_item_in_place() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&list(&[task_json("1", "a", false, "1")])))
        .await;
    mock.enqueue(MockResponse::json(&task_json("1", "a", true, "1")))
        .await;
    let api = api_for(&mock);

    let mut state = TaskState::default();
    dispatch::<TaskReducer>(&mut state, tasks::fetch_tasks(&api.tasks, &Default::default()).await);
    dispatch::<TaskReducer>(&mut state, tasks::toggle_task(&api.tasks, "1", true).await);

    assert!(state.items[0].completed);
}

#[tokio::test]
async fn worker_command_feeds_app() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&task_json("12", "Fresh", false, "3")))
        .await;
    let api = api_for(&mock);

    let payload = deskboard::model::TaskPayload {
        title: "Fresh".into(),
        description: "new".into(),
        assigned_user_id: "3".into(),
        ..Default::default()
    };
    let event = execute(&api, UiCommand::CreateTask(payload)).await;

    let mut app = App::new(&Config::default());
    app.set_screen(Screen::Tasks);
    match event {
        AppEvent::Tasks { op, intent } => {
            assert_eq!(op, ResourceOp::Create);
            app.on_tasks_result(op, intent);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(app.tasks().items[0].id, "12");
    assert_eq!(
        app.notifications().latest().map(|n| n.message.as_str()),
        Some("Task created successfully")
    );
}

#[tokio::test]
async fn health_command_reports_status() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::error(500, "down")).await;
    let api = api_for(&mock);

    let event = execute(&api, UiCommand::CheckHealth).await;
    assert!(matches!(event, AppEvent::Health(false)));
    let event = execute(&api, UiCommand::CheckHealth).await;
    assert!(matches!(event, AppEvent::Health(true)));
}
