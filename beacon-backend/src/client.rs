//! Client address extraction.
//!
//! Prefers the `X-Forwarded-For` header (taken verbatim) and falls back to
//! the peer IP recorded by `into_make_service_with_connect_info`.

use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

/// Header consulted before the socket peer address.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Reported when neither the header nor connect info is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The caller's address as a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self(resolve(&parts.headers, peer)))
    }
}

/// Resolve the client address from request headers and the socket peer.
#[must_use]
pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(value) = headers.get(FORWARDED_FOR) {
        return String::from_utf8_lossy(value.as_bytes()).into_owned();
    }
    peer.map_or_else(|| UNKNOWN_CLIENT.to_owned(), |addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_header_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        let peer = SocketAddr::from(([127, 0, 0, 1], 4000));
        assert_eq!(resolve(&headers, Some(peer)), "203.0.113.7, 10.0.0.1");
    }

    #[test]
    fn peer_ip_is_used_without_port() {
        let peer = SocketAddr::from(([192, 168, 1, 20], 51234));
        assert_eq!(resolve(&HeaderMap::new(), Some(peer)), "192.168.1.20");
    }

    #[test]
    fn missing_sources_report_unknown() {
        assert_eq!(resolve(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }
}
