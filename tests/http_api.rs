use pretty_assertions::assert_eq;
use serde_json::json;
use taskdeck::api::{ApiError, Credentials, HttpApi, RemoteApi, NETWORK_ERROR_MESSAGE};
use taskdeck::domain::{NewTask, Priority, TaskId, TaskPatch};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server() -> (MockServer, HttpApi) {
    let server = MockServer::start().await;
    let api = HttpApi::new(format!("{}/", server.uri()));
    (server, api)
}

#[tokio::test]
async fn login_returns_the_user_record() {
    let (server, api) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "ada", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"username": "ada", "id": 7}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = api
        .authenticate(&Credentials::new("ada", "pw"))
        .await
        .unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.extra.get("id"), Some(&json!(7)));
}

#[tokio::test]
async fn rejection_carries_server_message() {
    let (server, api) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = api
        .authenticate(&Credentials::new("ada", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }
    );
    assert_eq!(err.user_message("Login failed."), "Invalid credentials");
}

#[tokio::test]
async fn rejection_without_json_body_has_no_message() {
    let (server, api) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/users/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = api.register(&Credentials::new("ada", "pw")).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 500,
            message: None,
        }
    );
    assert_eq!(err.user_message("Signup failed."), "Signup failed.");
}

#[tokio::test]
async fn lists_tasks_for_the_user() {
    let (server, api) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(query_param("username", "ada lovelace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "text": "Buy milk", "completed": true, "priority": "low"},
            {"id": "t2", "text": "Write report", "dueDate": "2024-05-01T00:00:00.000Z"}
        ])))
        .mount(&server)
        .await;

    let tasks = api.list_tasks("ada lovelace").await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId("1".to_string()));
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].priority, Some(Priority::Low));
    assert_eq!(tasks[1].priority, None);
    assert_eq!(
        tasks[1].due_date.map(|d| d.to_string()).as_deref(),
        Some("2024-05-01")
    );
}

#[tokio::test]
async fn create_sends_username_with_task_fields() {
    let (server, api) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/todos/create"))
        .and(body_json(json!({
            "username": "ada",
            "text": "Pay rent",
            "dueDate": null,
            "priority": "high",
            "notes": "",
            "tags": ["home"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "n1", "text": "Pay rent", "priority": "high", "tags": ["home"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let task = api
        .create_task(
            "ada",
            &NewTask {
                text: "Pay rent".to_string(),
                due_date: None,
                priority: Priority::High,
                notes: String::new(),
                tags: vec!["home".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(task.id, TaskId("n1".to_string()));
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let (server, api) = server().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/update"))
        .and(body_json(json!({"id": "t1", "completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "text": "Buy milk", "completed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = TaskPatch {
        completed: Some(true),
        ..TaskPatch::default()
    };
    let task = api
        .update_task(&TaskId("t1".to_string()), &patch)
        .await
        .unwrap();

    assert!(task.completed);
}

#[tokio::test]
async fn update_can_clear_due_date() {
    let (server, api) = server().await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/update"))
        .and(body_json(json!({"id": "t1", "dueDate": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "text": "Buy milk", "dueDate": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = TaskPatch {
        due_date: Some(None),
        ..TaskPatch::default()
    };
    let task = api
        .update_task(&TaskId("t1".to_string()), &patch)
        .await
        .unwrap();

    assert_eq!(task.due_date, None);
}

#[tokio::test]
async fn delete_sends_id_in_body() {
    let (server, api) = server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/delete"))
        .and(body_json(json!({"id": "t1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    api.delete_task(&TaskId("t1".to_string())).await.unwrap();
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let (server, api) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api.list_tasks("ada").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.user_message("Failed to load."), "Failed to load.");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpApi::new(format!("http://{addr}"))
        .list_tasks("ada")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("Failed to load."), NETWORK_ERROR_MESSAGE);
}
