//! Mock statistics API
//!
//! Serves a transaction feed at `GET /api/statistic/transaksi` behind bearer
//! authentication, for local development and client tests. Uses hyper for
//! the HTTP server.

use crate::infra::config::Config;
use crate::io::fallback::DUMMY_FEED_JSON;
use anyhow::Context;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// What the mock server answers with
#[derive(Debug, Clone)]
pub struct MockApiState {
    stats_path: String,
    token: String,
    feed_json: String,
}

impl MockApiState {
    pub fn new(
        stats_path: impl Into<String>,
        token: impl Into<String>,
        feed_json: impl Into<String>,
    ) -> Self {
        Self { stats_path: stats_path.into(), token: token.into(), feed_json: feed_json.into() }
    }

    /// State serving the bundled dummy dataset
    pub fn with_dummy_feed(stats_path: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(stats_path, token, DUMMY_FEED_JSON)
    }

    /// State from config: configured dataset file, or the dummy dataset
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let feed_json = match config.mock_dataset() {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read mock dataset {path}"))?,
            None => DUMMY_FEED_JSON.to_string(),
        };
        Ok(Self::new(config.stats_path(), config.mock_token(), feed_json))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_feed_json(mut self, feed_json: impl Into<String>) -> Self {
        self.feed_json = feed_json.into();
        self
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn feed_json(&self) -> &str {
        &self.feed_json
    }

    fn authorized(&self, req: &Request<hyper::body::Incoming>) -> bool {
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == self.token)
    }
}

fn json_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<MockApiState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();

    let response = match req.method() {
        &Method::GET if path == state.stats_path => {
            if state.authorized(&req) {
                json_response(StatusCode::OK, state.feed_json.clone())
            } else {
                warn!(path = %path, "mock_api_unauthorized");
                json_response(StatusCode::UNAUTHORIZED, r#"{"message":"Unauthorized"}"#)
            }
        }
        &Method::GET if path == "/health" => json_response(StatusCode::OK, r#"{"ok":true}"#),
        _ => json_response(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#),
    };

    debug!(
        method = %req.method(),
        path = %path,
        status = %response.status().as_u16(),
        "mock_api_request"
    );
    Ok(response)
}

/// Serve on an already bound listener until `shutdown` flips to true
pub async fn serve(
    listener: TcpListener,
    state: Arc<MockApiState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!(addr = %listener.local_addr()?, path = %state.stats_path, "mock_api_started");

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let io = TokioIo::new(stream);
                        let state = state.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let state = state.clone();
                                async move { handle_request(req, state).await }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "mock_api_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "mock_api_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("mock_api_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config_uses_dummy_feed() {
        let state = MockApiState::from_config(&Config::default()).unwrap();
        assert_eq!(state.stats_path, "/api/statistic/transaksi");
        assert_eq!(state.token, "dev-token");
        assert_eq!(state.feed_json, DUMMY_FEED_JSON);
    }

    #[test]
    fn test_overrides_replace_token_and_feed() {
        let state = MockApiState::from_config(&Config::default())
            .unwrap()
            .with_token("cli-token")
            .with_feed_json(r#"{"totalTransaksi":0,"transaksi":[]}"#);
        assert_eq!(state.stats_path(), "/api/statistic/transaksi");
        assert_eq!(state.token(), "cli-token");
        assert_eq!(state.feed_json(), r#"{"totalTransaksi":0,"transaksi":[]}"#);
    }

    #[test]
    fn test_json_response_headers() {
        let response = json_response(StatusCode::UNAUTHORIZED, "{}");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
