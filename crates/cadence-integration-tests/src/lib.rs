//! Helpers for driving a real Cadence node over TCP.

use cadence_node::{CadenceNode, NodeConfig};
use cadence_store::SequenceStore;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A node serving on an ephemeral local port.
pub struct TestNode {
    pub addr: SocketAddr,
    pub store: Arc<SequenceStore>,
}

/// Start a node on `127.0.0.1:0` in a background task.
pub async fn spawn_node() -> TestNode {
    let config = NodeConfig {
        admin_socket: None,
        ..NodeConfig::default()
    };
    let node = CadenceNode::new(config);
    let store = node.store();

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = node.serve(listener).await;
    });

    TestNode { addr, store }
}

/// Status code and body of one HTTP exchange.
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    async fn read(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.expect("read reply body");
        Self { status, body }
    }
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}

/// `POST` a raw body, with an optional `Content-Type`.
pub async fn post_raw(
    addr: SocketAddr,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> HttpReply {
    let mut request = Client::new().post(url(addr, path)).body(body.to_string());
    if let Some(ct) = content_type {
        request = request.header(CONTENT_TYPE, ct);
    }
    HttpReply::read(request.send().await.expect("send request")).await
}

/// `POST /instruction` with a JSON body.
pub async fn post_instruction(addr: SocketAddr, seq: i64, instruction: &str) -> HttpReply {
    let response = Client::new()
        .post(url(addr, "/instruction"))
        .json(&serde_json::json!({ "seq": seq, "instruction": instruction }))
        .send()
        .await
        .expect("send instruction");
    HttpReply::read(response).await
}

/// `GET` a path.
pub async fn get(addr: SocketAddr, path: &str) -> HttpReply {
    let response = Client::new()
        .get(url(addr, path))
        .send()
        .await
        .expect("send request");
    HttpReply::read(response).await
}
