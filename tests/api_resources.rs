mod common;

use common::{api_for, list, task_json, user_json, MockApi, MockResponse};
use deskboard::api::{ApiError, TaskQuery, UserQuery};
use deskboard::model::{TaskPayload, UserPayload};

#[tokio::test]
async fn task_list_sends_query_and_merges_spellings() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(
        r#"[{"id": 3, "title": "Ship", "description": "d", "is_completed": "true",
             "start_date": "2024-02-01", "assigned_user_id": 5}]"#,
    ))
    .await;

    let api = api_for(&mock);
    let query = TaskQuery {
        search: Some("ship it".into()),
        completed: Some(true),
        ..TaskQuery::default()
    };
    let tasks = api.tasks.get_all(&query).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "3");
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].start_date.as_deref(), Some("2024-02-01"));
    assert_eq!(tasks[0].assigned_user_id.as_deref(), Some("5"));

    let requests = mock.requests().await;
    assert_eq!(requests[0].path, "/tasks");
    assert_eq!(
        requests[0].query.as_deref(),
        Some("search=ship+it&completed=true")
    );
}

#[tokio::test]
async fn tasks_by_user_filters_server_side() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&list(&[task_json("1", "a", false, "7")])))
        .await;

    let tasks = api_for(&mock).tasks.get_by_user("7").await.unwrap();

    assert_eq!(tasks.len(), 1);
    let requests = mock.requests().await;
    assert_eq!(requests[0].query.as_deref(), Some("assignedUserId=7"));
}

#[tokio::test]
async fn create_task_posts_camel_case_body() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&task_json("11", "New", false, "2")))
        .await;

    let payload = TaskPayload {
        title: "New".into(),
        description: "body".into(),
        completed: false,
        start_date: Some("2024-03-01".into()),
        end_date: Some("2024-03-02".into()),
        assigned_user_id: "2".into(),
    };
    let task = api_for(&mock).tasks.create(&payload).await.unwrap();

    assert_eq!(task.id, "11");
    let requests = mock.requests().await;
    assert_eq!(requests[0].method, "POST");
    let body = requests[0].json();
    assert_eq!(body["assignedUserId"], "2");
    assert_eq!(body["startDate"], "2024-03-01");
    assert!(body.get("createdAt").is_none());
}

#[tokio::test]
async fn invalid_task_is_rejected_before_sending() {
    let mock = MockApi::start().await;
    let payload = TaskPayload {
        title: "  ".into(),
        assigned_user_id: "2".into(),
        ..TaskPayload::default()
    };

    let err = api_for(&mock).tasks.create(&payload).await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidArgument(_)));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn toggle_patches_only_completion() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&task_json("4", "t", true, "1")))
        .await;

    let task = api_for(&mock).tasks.toggle_completed("4", true).await.unwrap();

    assert!(task.completed);
    let requests = mock.requests().await;
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/tasks/4");
    assert_eq!(
        requests[0].json(),
        serde_json::json!({"completed": true, "is_completed": true, "isCompleted": true})
    );
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::empty()).await;

    api_for(&mock).tasks.delete("4").await.unwrap();

    let requests = mock.requests().await;
    assert_eq!(requests[0].method, "DELETE");
}

#[tokio::test]
async fn blank_id_is_rejected_locally() {
    let mock = MockApi::start().await;
    let err = api_for(&mock).users.get_by_id(" ").await.unwrap_err();
    assert_eq!(err.to_string(), "ID is required");
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn user_update_puts_snake_case_body() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&user_json("5", "Ada", "King")))
        .await;

    let payload = UserPayload {
        first_name: "Ada".into(),
        last_name: "King".into(),
        email: "ada@example.com".into(),
        avatar: None,
    };
    let user = api_for(&mock).users.update("5", &payload).await.unwrap();

    assert_eq!(user.display_name(), "Ada King");
    let requests = mock.requests().await;
    assert_eq!(requests[0].method, "PUT");
    let body = requests[0].json();
    assert_eq!(body["first_name"], "Ada");
    assert!(body.get("avatar").is_none());
}

#[tokio::test]
async fn user_search_and_paging_params() {
    let mock = MockApi::start().await;
    let api = api_for(&mock);

    api.users.search("ada").await.unwrap();
    api.users
        .get_all(&UserQuery {
            limit: Some(10),
            page: Some(2),
            ..UserQuery::default()
        })
        .await
        .unwrap();

    let requests = mock.requests().await;
    assert_eq!(requests[0].query.as_deref(), Some("search=ada"));
    assert_eq!(requests[1].query.as_deref(), Some("limit=10&page=2"));
}

#[tokio::test]
async fn non_json_success_is_invalid() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse {
        content_type: Some("text/html"),
        ..MockResponse::json("<html></html>")
    })
    .await;

    let err = api_for(&mock).users.get_by_id("1").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidJson { .. }));
}

#[tokio::test]
async fn health_probe_requests_one_user() {
    let mock = MockApi::start().await;
    assert!(api_for(&mock).check_connection().await);
    let requests = mock.requests().await;
    assert_eq!(requests[0].path, "/users");
    assert_eq!(requests[0].query.as_deref(), Some("limit=1"));
}
