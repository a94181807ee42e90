//! # Mock Framework
//!
//! Utilities for testing clients without a network.
//!
//! Use [`create_mock_http`] to get a transport handle and the receiver its
//! requests land on. Then use [`expect_request`] to take each request, assert
//! on it, and [`reply`] with any status and body, in any order.

use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::actor_framework::{HttpClient, HttpRequest, RawResponse, Response, TransportRequest};

/// Creates a transport handle whose requests are delivered to `receiver`
/// instead of an `HttpActor`.
pub fn create_mock_http(buffer_size: usize) -> (HttpClient, mpsc::Receiver<TransportRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HttpClient::new(sender), receiver)
}

/// Waits for the next request sent through the mock transport.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<TransportRequest>,
) -> Option<(HttpRequest, Response<RawResponse>)> {
    receiver
        .recv()
        .await
        .map(|TransportRequest { request, respond_to }| (request, respond_to))
}

pub fn reply(respond_to: Response<RawResponse>, status: u16, body: impl Into<String>) {
    let _ = respond_to.send(Ok(RawResponse::new(status, body)));
}

pub fn ok_body(data: Value) -> String {
    json!({ "Data": data, "Success": true, "Message": null }).to_string()
}

pub fn paged_body(data: Value, total: u64, page: u32, page_size: u32) -> String {
    json!({
        "Data": data,
        "Success": true,
        "Message": null,
        "Total": total,
        "Page": page,
        "PageSize": page_size
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::Method;

    #[tokio::test]
    async fn test_mock_transport() {
        let (client, mut receiver) = create_mock_http(10);

        let send_task = tokio::spawn(async move { client.send(HttpRequest::get("/api/ping")).await });

        let (request, responder) = expect_request(&mut receiver).await.expect("Expected request");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/api/ping");
        reply(responder, 200, ok_body(json!("pong")));

        let response = send_task.await.unwrap().unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("pong"));
    }
}
