//! Minimal HTTP client for the backend service.
//!
//! Each call opens one HTTP/1.1 connection with hyper over a tokio
//! `TcpStream`, sends a `GET`, and decodes the JSON body. Only plain `http`
//! URLs are supported.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{header, Method, Request, Uri};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpStream;

use crate::error::UpstreamError;

/// Deadline for one complete backend exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only access to the backend API.
///
/// Implementations must be `Send + Sync` to live in router state.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Base URL the frontend reports on its index endpoint.
    fn base_url(&self) -> &str;

    /// `GET` the given path and decode the JSON response.
    ///
    /// # Errors
    /// Returns an [`UpstreamError`] on connection, HTTP, status, or decode failure.
    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError>;
}

/// [`BackendApi`] over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    url: String,
    host: String,
    port: u16,
    authority: String,
    base_path: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a client for the backend at `url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    /// Returns [`UpstreamError::InvalidUrl`] if the URL does not parse, is not
    /// `http`, or has no host.
    pub fn new(url: &str) -> Result<Self, UpstreamError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom exchange deadline.
    ///
    /// # Errors
    /// Same as [`HttpBackend::new`].
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let invalid = |reason: String| UpstreamError::InvalidUrl {
            url: url.to_owned(),
            reason,
        };

        let uri: Uri = url.parse().map_err(|e| invalid(format!("{e}")))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(invalid(format!("unsupported scheme '{other}'"))),
            None => return Err(invalid("missing scheme".to_owned())),
        }
        let authority = uri
            .authority()
            .ok_or_else(|| invalid("missing host".to_owned()))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_owned(),
            // `Authority::host` keeps IPv6 literals bracketed (`[::1]`).
            host: authority
                .host()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_owned(),
            port: authority.port_u16().unwrap_or(80),
            authority: authority.as_str().to_owned(),
            base_path: uri.path().trim_end_matches('/').to_owned(),
            timeout,
        })
    }

    async fn fetch(&self, path: &str) -> Result<Value, UpstreamError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| UpstreamError::Connect {
                addr: self.authority.clone(),
                reason: e.to_string(),
            })?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| UpstreamError::Http(format!("handshake: {e}")))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("backend connection closed: {e}");
            }
        });

        let req = Request::builder()
            .method(Method::GET)
            .uri(format!("{}{path}", self.base_path))
            .header(header::HOST, &self.authority)
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| UpstreamError::Http(format!("build request: {e}")))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| UpstreamError::Http(format!("send request: {e}")))?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| UpstreamError::Http(format!("read response body: {e}")))?
            .to_bytes();

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    fn base_url(&self) -> &str {
        &self.url
    }

    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError> {
        tokio::time::timeout(self.timeout, self.fetch(path))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout))?
    }
}
