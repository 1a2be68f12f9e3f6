//! Integration test: the backend served over a real TCP socket.
//!
//! Verifies that the peer address reaches `/process` when the router is
//! served with connect info, and that the sample list is stable across
//! requests.

use std::net::SocketAddr;

use beacon_backend::routes::create_router;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{header, Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener has local addr");
    let app = create_router().into_make_service_with_connect_info::<SocketAddr>();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });
    addr
}

/// Send one HTTP/1.1 request and return the status and decoded JSON body.
async fn request(
    addr: SocketAddr,
    method: Method,
    path: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let stream = TcpStream::connect(addr).await.expect("connect to server");
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .expect("HTTP handshake");

    // Drive the connection in the background.
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let req = Request::builder()
        .method(method)
        .uri(path)
        .header(header::HOST, addr.to_string())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("request builds");

    let resp = sender.send_request(req).await.expect("send request");
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    (status, serde_json::from_slice(&bytes).expect("JSON body"))
}

#[tokio::test]
async fn process_reports_peer_ip_without_forwarded_header() {
    let addr = spawn_server().await;
    let (status, body) = request(
        addr,
        Method::POST,
        "/process",
        r#"{"name":"Carol","age":30}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timestamp"], "127.0.0.1");
    assert_eq!(body["data_count"], 2);
    assert_eq!(body["message"], "Successfully processed data for Carol");
}

#[tokio::test]
async fn sample_items_survive_create_requests() {
    let addr = spawn_server().await;

    let (status, _) = request(
        addr,
        Method::POST,
        "/api/data",
        r#"{"id":4,"name":"Item 4"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for _ in 0..3 {
        let (status, body) = request(addr, Method::GET, "/api/data", "").await;
        assert_eq!(status, StatusCode::OK);
        let items = body["data"].as_array().expect("data array");
        assert_eq!(items.len(), 3, "the list must never grow");
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[2]["id"], 3);
    }
}
