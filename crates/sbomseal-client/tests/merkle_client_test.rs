//! Contract tests for MerkleProofClient against a mock subsystem.

use std::time::Duration;

use sbomseal_client::{RemoteError, SubsystemClients, SubsystemConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_clients(server: &MockServer, timeout_secs: u64) -> SubsystemClients {
    let url: url::Url = server.uri().parse().unwrap();
    let config = SubsystemConfig {
        merkle_url: url.clone(),
        proving_url: url.clone(),
        artifact_store_url: url.clone(),
        ledger_anchor_url: url,
        merkle_timeout_secs: timeout_secs,
        proving_timeout_secs: timeout_secs,
        store_timeout_secs: timeout_secs,
        anchor_timeout_secs: timeout_secs,
    };
    SubsystemClients::new(config).unwrap()
}

fn banned() -> Vec<String> {
    vec!["pkg-a".to_string(), "pkg-b".to_string()]
}

#[tokio::test]
async fn generate_proofs_sends_smt_batch_request() {
    let server = MockServer::start().await;
    let root = "aa".repeat(32);

    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .and(body_partial_json(serde_json::json!({
            "root": root,
            "purls": ["pkg-a", "pkg-b"],
            "compress": true,
            "accumulator": "smt",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "root": root,
            "depth": 256,
            "merkle_proofs": [{"purl": "pkg-a"}, {"purl": "pkg-b"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    let batch = clients.merkle().generate_proofs(&root, &banned()).await.unwrap();
    assert_eq!(batch.merkle_proofs.len(), 2);
    assert_eq!(batch.depth, 256);
    assert_eq!(batch.root, root);
}

#[tokio::test]
async fn generate_proofs_defaults_depth_and_root_when_absent() {
    let server = MockServer::start().await;
    let root = "bb".repeat(32);

    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "merkle_proofs": [{"purl": "pkg-a"}],
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    let batch = clients.merkle().generate_proofs(&root, &banned()).await.unwrap();
    assert_eq!(batch.depth, 256);
    assert_eq!(batch.root, root);
}

#[tokio::test]
async fn generate_proofs_defaults_depth_when_out_of_range() {
    let server = MockServer::start().await;
    let root = "dd".repeat(32);

    // A depth that does not fit in u32 is nonsense; fall back to the
    // default rather than truncating.
    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "root": root,
            "depth": u64::from(u32::MAX) + 1,
            "merkle_proofs": [{"purl": "pkg-a"}],
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    let batch = clients.merkle().generate_proofs(&root, &banned()).await.unwrap();
    assert_eq!(batch.depth, 256);
}

#[tokio::test]
async fn generate_proofs_yields_empty_batch_for_missing_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    let batch = clients
        .merkle()
        .generate_proofs(&"cc".repeat(32), &banned())
        .await
        .unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn generate_proofs_classifies_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .respond_with(ResponseTemplate::new(503).set_body_string("smt backend down"))
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    let err = clients
        .merkle()
        .generate_proofs(&"dd".repeat(32), &banned())
        .await
        .unwrap_err();
    match err {
        RemoteError::UpstreamStatus { status, body, .. } => {
            assert_eq!(status, 503);
            assert!(body.contains("smt backend down"));
        }
        other => panic!("expected UpstreamStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn generate_proofs_classifies_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prove-batch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"merkle_proofs": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let clients = test_clients(&server, 1);
    let err = clients
        .merkle()
        .generate_proofs(&"ee".repeat(32), &banned())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Timeout { timeout_secs: 1, .. }));
}

#[tokio::test]
async fn generate_proofs_classifies_connect_failure() {
    // Nothing listens on this port.
    let config = SubsystemConfig {
        merkle_url: "http://127.0.0.1:19099".parse().unwrap(),
        ..SubsystemConfig::default()
    };
    let clients = SubsystemClients::new(config).unwrap();
    let err = clients
        .merkle()
        .generate_proofs(&"ff".repeat(32), &banned())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::ConnectFailed { .. }));
}

#[tokio::test]
async fn health_reduces_failures_to_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    assert!(!clients.merkle().health().await);
}

#[tokio::test]
async fn health_true_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "healthy"})),
        )
        .mount(&server)
        .await;

    let clients = test_clients(&server, 5);
    assert!(clients.merkle().health().await);
}
