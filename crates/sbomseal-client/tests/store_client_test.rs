//! Contract tests for ArtifactStoreClient: 404-as-miss, put-once
//! semantics, and base64 payload shape.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sbomseal_client::{RemoteError, SubsystemClients, SubsystemConfig};
use sbomseal_core::NormalizedHash;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_clients(server: &MockServer) -> SubsystemClients {
    let url: url::Url = server.uri().parse().unwrap();
    let config = SubsystemConfig {
        merkle_url: url.clone(),
        proving_url: url.clone(),
        artifact_store_url: url.clone(),
        ledger_anchor_url: url,
        merkle_timeout_secs: 5,
        proving_timeout_secs: 5,
        store_timeout_secs: 5,
        anchor_timeout_secs: 5,
    };
    SubsystemClients::new(config).unwrap()
}

fn key() -> NormalizedHash {
    NormalizedHash::parse(&"ab".repeat(32)).unwrap()
}

#[tokio::test]
async fn exists_returns_none_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/retrieve/{}", key())))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Composite hash not found"
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    assert_eq!(clients.store().exists(&key()).await.unwrap(), None);
}

#[tokio::test]
async fn exists_returns_locator_on_hit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/retrieve/{}", key())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ipfs_cid": "QmExistingCid",
            "composite_hash": key().as_str(),
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    assert_eq!(
        clients.store().exists(&key()).await.unwrap(),
        Some("QmExistingCid".to_string())
    );
}

#[tokio::test]
async fn exists_fails_on_missing_cid_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/retrieve/{}", key())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "composite_hash": key().as_str(),
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    let err = clients.store().exists(&key()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode { .. }));
}

#[tokio::test]
async fn store_encodes_artifact_as_base64() {
    let server = MockServer::start().await;
    let artifact = serde_json::json!({"compliant": true, "proof": "blob"});

    Mock::given(method("POST"))
        .and(path("/store"))
        .respond_with(move |req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            // The proof field must round-trip back to the artifact bytes.
            let encoded = body["proof"].as_str().unwrap();
            let decoded = BASE64.decode(encoded).unwrap();
            let roundtrip: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
            assert_eq!(roundtrip["compliant"], serde_json::json!(true));
            assert_eq!(body["composite_hash"], serde_json::json!("ab".repeat(32)));

            ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "ipfs_cid": "QmFreshCid",
                "composite_hash": body["composite_hash"],
            }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    let locator = clients.store().store(&artifact, &key()).await.unwrap();
    assert_eq!(locator, "QmFreshCid");
}

#[tokio::test]
async fn store_accepts_existing_key_response() {
    // The store answers 200 (not 201) with the existing locator when the
    // key is already present; the client treats that as success.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ipfs_cid": "QmAlreadyThere",
            "composite_hash": key().as_str(),
        })))
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    let artifact = serde_json::json!({"compliant": false});
    let locator = clients.store().store(&artifact, &key()).await.unwrap();
    assert_eq!(locator, "QmAlreadyThere");
}

#[tokio::test]
async fn store_surfaces_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store"))
        .respond_with(ResponseTemplate::new(503).set_body_string("IPFS not connected"))
        .mount(&server)
        .await;

    let clients = test_clients(&server);
    let artifact = serde_json::json!({});
    let err = clients.store().store(&artifact, &key()).await.unwrap_err();
    match err {
        RemoteError::UpstreamStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected UpstreamStatus, got: {other:?}"),
    }
}
