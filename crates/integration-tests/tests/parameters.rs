mod harness;

use harness::config::ConfigBuilder;
use harness::server::{TestServer, error_envelope};
use serde_json::json;

#[tokio::test]
async fn typed_path_and_query() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/api/users/42?includeAddress=true"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"id": 42, "includeAddress": true}));
}

#[tokio::test]
async fn path_segment_not_an_integer() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/api/users/not-an-integer"))
        .send()
        .await
        .unwrap();

    let envelope = error_envelope(resp, 404).await;
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "errors": [{
                "code": "INVALID_RESOURCE",
                "message": "The requested resource does not exist."
            }]
        })
    );
}

#[tokio::test]
async fn path_segment_out_of_range() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/api/users/9223372036854775807"))
        .send()
        .await
        .unwrap();

    let envelope = error_envelope(resp, 404).await;
    assert_eq!(envelope.errors()[0].code, "INVALID_RESOURCE");
}

#[tokio::test]
async fn query_value_not_a_boolean() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/api/users/1?includeAddress=not-a-boolean"))
        .send()
        .await
        .unwrap();

    let envelope = error_envelope(resp, 400).await;
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "errors": [{
                "field": "includeAddress",
                "code": "BAD_QUERY_PARAMETER",
                "message": "The query parameter value is invalid."
            }]
        })
    );
}

#[tokio::test]
async fn repeated_query_key() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/api/users/1?includeAddress=true&includeAddress=false"))
        .send()
        .await
        .unwrap();

    let envelope = error_envelope(resp, 400).await;
    assert_eq!(envelope.errors()[0].field.as_deref(), Some("includeAddress"));
    assert_eq!(envelope.errors()[0].code, "BAD_QUERY_PARAMETER");
}
