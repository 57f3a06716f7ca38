//! `HttpTodosClient` against a mock HTTP server.

#![allow(clippy::unwrap_used)]

use std::time::Duration;
use taskflow::{HttpTodosClient, Task, TodosClient, TodosClientError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpTodosClient {
    HttpTodosClient::new(format!("{}/todos", server.uri()), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_todos_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[
                {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
                {"userId": 1, "id": 2, "title": "quis ut nam facilis", "completed": true}
            ]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let todos = client_for(&server).await.fetch_todos().await.unwrap();

    assert_eq!(
        todos,
        vec![
            Task::new(1, "delectus aut autem", false),
            Task::new(2, "quis ut nam facilis", true),
        ]
    );
}

#[tokio::test]
async fn test_fetch_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let todos = client_for(&server).await.fetch_todos().await.unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let error = client_for(&server).await.fetch_todos().await.unwrap_err();

    assert!(matches!(
        error,
        TodosClientError::Status { status: 500, ref body } if body == "internal error"
    ));
}

#[tokio::test]
async fn test_bad_body_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"todos": []}"#, "application/json"))
        .mount(&server)
        .await;

    let error = client_for(&server).await.fetch_todos().await.unwrap_err();
    assert!(matches!(error, TodosClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_request() {
    let client = HttpTodosClient::new("http://127.0.0.1:1/todos", Duration::from_secs(2)).unwrap();
    let error = client.fetch_todos().await.unwrap_err();
    assert!(matches!(error, TodosClientError::Request(_)));
}
