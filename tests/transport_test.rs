//! reqwest transport against a mock console.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};
use serde_json::json;

use qradar_appkit::rest::{
    CertVerification, OutboundRequest, ReqwestTransport, RestMethod, Transport,
};

mod common;

fn request(url: String) -> OutboundRequest {
    OutboundRequest {
        method: RestMethod::Get,
        url,
        headers: HeaderMap::new(),
        body: None,
        params: Vec::new(),
        json_body: None,
        timeout: Duration::from_secs(5),
        verify: CertVerification::Disabled,
    }
}

#[tokio::test]
async fn test_sends_method_headers_and_query() {
    let addr = common::start_echo_backend().await;
    let transport = ReqwestTransport::direct().unwrap();

    let mut req = request(format!("http://{}/api/siem/offenses", addr));
    req.method = RestMethod::Delete;
    req.headers.insert("sec", HeaderValue::from_static("token-1"));
    req.headers.insert("version", HeaderValue::from_static("12.0"));
    req.params = vec![("filter".into(), "id=5".into())];

    let res = transport.send(req).await.unwrap();
    assert_eq!(res.status(), 200);

    let echoed = res.text().await.unwrap();
    assert!(echoed.starts_with("DELETE /api/siem/offenses?filter=id%3D5 HTTP/1.1"), "{}", echoed);
    assert!(echoed.contains("sec: token-1"));
    assert!(echoed.contains("version: 12.0"));
}

#[tokio::test]
async fn test_sends_json_body() {
    let addr = common::start_echo_backend().await;
    let transport = ReqwestTransport::direct().unwrap();

    let mut req = request(format!("http://{}/api/ariel/searches", addr));
    req.method = RestMethod::Post;
    req.json_body = Some(json!({"query_expression": "SELECT 1"}));

    let echoed = transport.send(req).await.unwrap().text().await.unwrap();
    assert!(echoed.starts_with("POST /api/ariel/searches HTTP/1.1"));
    assert!(echoed.contains("content-type: application/json"));
    assert!(echoed.ends_with(r#"{"query_expression":"SELECT 1"}"#));
}

#[tokio::test]
async fn test_sends_raw_body() {
    let addr = common::start_echo_backend().await;
    let transport = ReqwestTransport::direct().unwrap();

    let mut req = request(format!("http://{}/api/reference_data/sets/bulk_load/x", addr));
    req.method = RestMethod::Put;
    req.body = Some(b"[\"1.2.3.4\"]".to_vec());

    let echoed = transport.send(req).await.unwrap().text().await.unwrap();
    assert!(echoed.ends_with("[\"1.2.3.4\"]"));
}

#[tokio::test]
async fn test_missing_bundle_is_transport_error() {
    let transport = ReqwestTransport::direct().unwrap();

    let mut req = request("https://127.0.0.1:1/api".to_string());
    req.verify = CertVerification::Bundle("/nonexistent/ca-bundle.crt".into());

    let err = transport.send(req).await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/ca-bundle.crt"));
}

#[tokio::test]
async fn test_bundle_client_is_reused() {
    let addr = common::start_echo_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("ca-bundle.crt");
    std::fs::write(&bundle, "").unwrap();

    let transport = ReqwestTransport::direct().unwrap();
    let bundled = |url: String| {
        let mut req = request(url);
        req.verify = CertVerification::Bundle(bundle.clone());
        req
    };

    let res = transport.send(bundled(format!("http://{}/api/a", addr))).await.unwrap();
    assert_eq!(res.status(), 200);

    // Bundle is gone, but the client built from it is still used.
    std::fs::remove_file(&bundle).unwrap();
    let res = transport.send(bundled(format!("http://{}/api/b", addr))).await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_connection_refused_surfaces_reqwest_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::direct().unwrap();
    let err = transport
        .send(request(format!("http://{}/api", addr)))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<reqwest::Error>().is_some());
}
