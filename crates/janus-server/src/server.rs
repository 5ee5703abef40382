//! HTTP server and request routing.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderName, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use janus_authz::{Authorizer, DecisionError};
use janus_config::ServerConfig;
use janus_telemetry::{record_request, render_metrics, InFlightGuard};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use crate::error::{ErrorResponse, ServerError, ServerResult};
use crate::health::HealthChecker;
use crate::request::AuthorizeRequest;

/// Request ID header, read from the caller when present and always echoed.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Everything a request handler needs.
#[derive(Debug)]
pub struct AppState {
    authorizer: Authorizer,
    health: HealthChecker,
    max_body_bytes: usize,
}

impl AppState {
    /// Create handler state around `authorizer`.
    pub fn new(authorizer: Authorizer, max_body_bytes: usize) -> Self {
        let health = HealthChecker::new(authorizer.inspector().key_store().clone());
        Self {
            authorizer,
            health,
            max_body_bytes,
        }
    }

    /// Health checker.
    pub fn health(&self) -> &HealthChecker {
        &self.health
    }
}

/// Janus HTTP server.
pub struct JanusServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl JanusServer {
    /// Create a server answering with `authorizer`.
    pub fn new(config: ServerConfig, authorizer: Authorizer) -> Self {
        let state = Arc::new(AppState::new(authorizer, config.max_body_bytes));
        Self { config, state }
    }

    /// Shared handler state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> ServerResult<()> {
        let addr: SocketAddr = self
            .config
            .http_addr
            .parse()
            .map_err(|e| ServerError::server(format!("invalid listen address: {e}")))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::server(format!("failed to bind {addr}: {e}")))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve connections from `listener` until `shutdown` completes.
    ///
    /// Open connections are then asked to finish their current request and
    /// given `shutdown_timeout_secs` before being dropped.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "janus listening");

        let (drain_tx, drain_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        self.state.health.set_ready(true);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                accepted = listener.accept() => {
                    let (stream, peer_addr) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                            continue;
                        }
                    };

                    while connections.try_join_next().is_some() {}

                    let state = self.state.clone();
                    let drain_rx = drain_rx.clone();
                    connections.spawn(
                        serve_connection(stream, state, drain_rx)
                            .instrument(tracing::debug_span!("connection", peer = %peer_addr)),
                    );
                }
            }
        }

        self.state.health.set_ready(false);
        info!(open = connections.len(), "shutting down");
        let _ = drain_tx.send(true);

        let grace = Duration::from_secs(self.config.shutdown_timeout_secs);
        let drained = tokio::time::timeout(grace, async {
            while connections.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(open = connections.len(), "grace period elapsed; dropping connections");
            connections.abort_all();
        }

        Ok(())
    }
}

async fn serve_connection(
    stream: tokio::net::TcpStream,
    state: Arc<AppState>,
    mut drain_rx: watch::Receiver<bool>,
) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(handle_request(req, &state).await) }
    });

    let conn = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => {
            if let Err(e) = result {
                debug!(error = %e, "connection error");
            }
        }
        _ = drain_rx.changed() => {
            conn.as_mut().graceful_shutdown();
            if let Err(e) = conn.await {
                debug!(error = %e, "connection error while draining");
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Route one request.
///
/// Never fails: every outcome, including a refused token, is an HTTP
/// response carrying an `x-request-id` header.
pub async fn handle_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let start = Instant::now();
    let _in_flight = InFlightGuard::new();

    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::now_v7().to_string(), ToString::to_string);

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let (endpoint, mut response) = match (&method, path.as_str()) {
            (&Method::POST, "/authorize") => {
                ("authorize", authorize(req.into_body(), state, &request_id).await)
            }
            (_, "/authorize") => (
                "authorize",
                error_response(StatusCode::METHOD_NOT_ALLOWED, "use POST", &request_id),
            ),
            (&Method::GET, internal) if internal.starts_with("/_janus/") => {
                handle_internal_endpoint(internal, state, &request_id).await
            }
            _ => (
                "unknown",
                error_response(StatusCode::NOT_FOUND, "no such endpoint", &request_id),
            ),
        };

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
        }

        let status = response.status();
        let duration = start.elapsed();
        record_request(endpoint, status.as_u16(), duration);
        debug!(
            status = status.as_u16(),
            duration_ms = %duration.as_millis(),
            "request completed"
        );

        response
    }
    .instrument(span)
    .await
}

async fn authorize<B>(body: B, state: &AppState, request_id: &str) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body = match Limited::new(body, state.max_body_bytes).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return error_response(
                StatusCode::BAD_REQUEST,
                "request body unreadable or too large",
                request_id,
            );
        }
    };

    let request = match AuthorizeRequest::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "rejected authorize body");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string(), request_id);
        }
    };

    match state
        .authorizer
        .decide(&request.token, &request.resource_arn)
        .await
    {
        Ok(decision) => json_response(StatusCode::OK, &decision),
        Err(e) => decision_error_response(&e, request_id),
    }
}

async fn handle_internal_endpoint(
    path: &str,
    state: &AppState,
    request_id: &str,
) -> (&'static str, Response<Full<Bytes>>) {
    match path {
        "/_janus/health" => {
            ("health", json_response(StatusCode::OK, &state.health.liveness()))
        }
        "/_janus/ready" => {
            let response = state.health.readiness().await;
            let status = if response.status.is_ready() {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            ("ready", json_response(status, &response))
        }
        "/_janus/metrics" => match render_metrics() {
            Some(text) => ("metrics", text_response(StatusCode::OK, text)),
            None => (
                "metrics",
                error_response(StatusCode::NOT_FOUND, "metrics are disabled", request_id),
            ),
        },
        "/_janus/version" => {
            let version = serde_json::json!({
                "name": "janus",
                "version": crate::VERSION,
            });
            ("version", json_response(StatusCode::OK, &version))
        }
        _ => (
            "unknown",
            error_response(
                StatusCode::NOT_FOUND,
                &format!("unknown internal endpoint: {path}"),
                request_id,
            ),
        ),
    }
}

// Token failures all look the same to the caller; the reason is logged.
fn decision_error_response(err: &DecisionError, request_id: &str) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if err.is_unauthorized() {
        "Unauthorized".to_string()
    } else {
        err.to_string()
    };
    error_response(status, &message, request_id)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => {
            let mut response = Response::new(Full::new(Bytes::from(json)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

fn text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(PROMETHEUS_CONTENT_TYPE));
    response
}

fn error_response(status: StatusCode, message: &str, request_id: &str) -> Response<Full<Bytes>> {
    let error = ErrorResponse::new(status.canonical_reason().unwrap_or("Error"), message)
        .with_request_id(request_id);

    json_response(status, &error)
}
