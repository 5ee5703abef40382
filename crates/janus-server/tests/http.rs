//! The server over a real socket.

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use janus_config::ServerConfig;
use janus_keystore::KeyStore;
use janus_server::{build_authorizer, AuthorizeRequest, JanusServer, REQUEST_ID_HEADER};
use janus_test::{mint_token, sample_claims, seeded_source, KEY_A, RESOURCE_ARN};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

struct Running {
    addr: std::net::SocketAddr,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<janus_server::ServerResult<()>>,
}

async fn start(keys: KeyStore) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig {
        shutdown_timeout_secs: 1,
        ..ServerConfig::default()
    };
    let server = JanusServer::new(
        config,
        build_authorizer(keys, &janus_config::JanusConfig::default()),
    );

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(listener, async {
        let _ = stopped.await;
    }));

    Running { addr, stop, handle }
}

async fn send(addr: std::net::SocketAddr, req: Request<Full<Bytes>>) -> (StatusCode, http::HeaderMap, Value) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);

    let response = sender.send_request(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

fn authorize(addr: std::net::SocketAddr, body: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("http://{addr}/authorize"))
        .header("host", addr.to_string())
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

fn get(addr: std::net::SocketAddr, path: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .uri(format!("http://{addr}{path}"))
        .header("host", addr.to_string())
        .body(Full::new(Bytes::new()))
        .unwrap()
}

#[tokio::test]
async fn test_authorize_over_http() {
    let running = start(KeyStore::new(seeded_source())).await;

    let token = mint_token(&KEY_A, &sample_claims());
    let body = serde_json::json!({
        "type": "TOKEN",
        "authorizationToken": format!("Bearer {token}"),
        "methodArn": RESOURCE_ARN,
    })
    .to_string();

    let (status, headers, json) = send(running.addr, authorize(running.addr, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(&REQUEST_ID_HEADER));
    assert_eq!(json["policyDocument"]["Statement"][0]["Effect"], "Allow");
    assert!(json["context"]["claims"].is_string());

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_key_store_outage_is_503() {
    let source = seeded_source();
    let running = start(KeyStore::new(source.clone())).await;

    let (status, _, _) = send(running.addr, get(running.addr, "/_janus/ready")).await;
    assert_eq!(status, StatusCode::OK);

    source.set_available(false);

    let token = mint_token(&KEY_A, &sample_claims());
    let body = serde_json::to_string(&AuthorizeRequest::new(token, RESOURCE_ARN)).unwrap();
    let (status, _, json) = send(running.addr, authorize(running.addr, &body)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json.get("policyDocument").is_none());

    let (status, _, json) = send(running.addr, get(running.addr, "/_janus/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "not_ready");

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let running = start(KeyStore::new(seeded_source())).await;

    let (status, _, json) = send(running.addr, authorize(running.addr, "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Bad Request");

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let running = start(KeyStore::new(Arc::new(janus_keystore::MemoryKeySource::new()))).await;
    let addr = running.addr;

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
