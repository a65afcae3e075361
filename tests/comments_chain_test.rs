use std::net::TcpListener;
use std::sync::Arc;

use request_chain::config::ApiConfig;
use request_chain::domain::{
    ChainResult, CommentsChainBuilder, ErrorKind, RouteTemplates, StatusPolicy, StepFailure,
};
use request_chain::infrastructure::HttpClient;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POST: &str = "/blogs/42/posts/Promise-Chaining";
const MISSING_POST: &str = "/blogs/42/posts/Not-A-Real-Post";

/// Answer `GET route` with `status` and a JSON body, expecting `times` calls
async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_ok(server: &MockServer, route: &str, body: Value) {
    mount_json(server, route, 200, body, 1).await;
}

fn builder_for(base_url: String) -> CommentsChainBuilder {
    let config = ApiConfig {
        base_url,
        timeout_ms: 2_000,
        ..Default::default()
    };
    let client = HttpClient::new(&config).expect("client should build");

    CommentsChainBuilder::new(Arc::new(client), &RouteTemplates::default())
        .expect("default routes are valid")
}

async fn resolve(builder: &CommentsChainBuilder, username: &str, title: &str) -> ChainResult {
    builder
        .fetch_comments(username, title)
        .await
        .expect("chain should build")
}

#[tokio::test]
async fn resolves_comments_for_existing_post() {
    let server = MockServer::start().await;
    mount_ok(&server, "/users/peter", json!({"id": 7})).await;
    mount_ok(&server, "/users/7/blog", json!({"id": 42})).await;
    mount_ok(&server, POST, json!({"id": 99})).await;
    mount_ok(&server, "/posts/99/comments", json!([{"text": "nice"}])).await;

    let result = resolve(&builder_for(server.uri()), "peter", "Promise-Chaining").await;

    assert_eq!(result, ChainResult::success(json!([{"text": "nice"}])));
}

#[tokio::test]
async fn missing_post_fails_at_step_two_without_fetching_comments() {
    let server = MockServer::start().await;
    let not_found = json!({"error": "not found"});
    mount_ok(&server, "/users/peter", json!({"id": 7})).await;
    mount_ok(&server, "/users/7/blog", json!({"id": 42})).await;
    mount_json(&server, MISSING_POST, 404, not_found, 1).await;
    mount_json(&server, "/posts/99/comments", 200, json!([]), 0).await;

    let result = resolve(&builder_for(server.uri()), "peter", "Not-A-Real-Post").await;
    let error = result.error().expect("chain should fail");

    assert_eq!(error.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(error.step_index, 2);
    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn title_with_reserved_characters_is_escaped() {
    let server = MockServer::start().await;
    mount_ok(&server, "/users/peter", json!({"id": 7})).await;
    mount_ok(&server, "/users/7/blog", json!({"id": 42})).await;
    let escaped_post = "/blogs/42/posts/C%23%2FAsync%20Tips";
    mount_ok(&server, escaped_post, json!({"id": 99})).await;
    mount_ok(&server, "/posts/99/comments", json!([{"text": "finally"}])).await;

    let result = resolve(&builder_for(server.uri()), "peter", "C#/Async Tips").await;

    assert_eq!(result, ChainResult::success(json!([{"text": "finally"}])));
}

#[tokio::test]
async fn server_error_on_first_step_stops_everything() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/peter", 500, json!({"id": 7}), 1).await;
    mount_json(&server, "/users/7/blog", 200, json!({"id": 42}), 0).await;

    let result = resolve(&builder_for(server.uri()), "peter", "Promise-Chaining").await;
    let error = result.error().unwrap();

    assert_eq!(error.step_index, 0);
    assert_eq!(error.status_code(), Some(500));
}

#[tokio::test]
async fn undecodable_body_is_parse_failure() {
    let server = MockServer::start().await;
    mount_ok(&server, "/users/peter", json!({"id": 7})).await;
    Mock::given(method("GET"))
        .and(path("/users/7/blog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = resolve(&builder_for(server.uri()), "peter", "Promise-Chaining").await;
    let error = result.error().unwrap();

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.step_index, 1);
    match &error.failure {
        StepFailure::Parse { body, .. } => assert_eq!(body, "<html>maintenance</html>"),
        other => panic!("expected parse failure, got {:?}", other),
    }
}

#[tokio::test]
async fn created_status_depends_on_policy() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/peter", 201, json!({"id": 7}), 2).await;
    mount_ok(&server, "/users/7/blog", json!({"id": 42})).await;
    mount_ok(&server, POST, json!({"id": 99})).await;
    mount_ok(&server, "/posts/99/comments", json!([])).await;

    let strict = resolve(&builder_for(server.uri()), "peter", "Promise-Chaining").await;
    let error = strict.error().unwrap();
    assert_eq!(error.kind(), ErrorKind::UnexpectedStatus);

    let lenient = builder_for(server.uri()).with_status_policy(StatusPolicy::AnySuccess);
    let result = resolve(&lenient, "peter", "Promise-Chaining").await;
    assert_eq!(result, ChainResult::success(json!([])));
}

#[tokio::test]
async fn repeated_resolution_gives_identical_results() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/peter", 200, json!({"id": 7}), 2).await;
    mount_json(&server, "/users/7/blog", 200, json!({"id": 42}), 2).await;
    mount_json(&server, MISSING_POST, 404, json!({}), 2).await;

    let builder = builder_for(server.uri());
    let first = resolve(&builder, "peter", "Not-A-Real-Post").await;
    let second = resolve(&builder, "peter", "Not-A-Real-Post").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn unreachable_api_is_transport_failure() {
    // Nothing listens on a port the OS just handed out and got back
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let builder = builder_for(format!("http://{}", addr));
    let result = resolve(&builder, "peter", "Promise-Chaining").await;
    let error = result.error().unwrap();

    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.step_index, 0);
}
