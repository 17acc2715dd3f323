// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum Reply {
    Respond(u16, String),
    /// Never answer, like a watch with no events
    Stall,
}

type Scripted = VecDeque<Reply>;

/// A mock HTTP service that replays scripted responses per request path.
///
/// Each path holds a queue of responses; the last one is repeated once the
/// queue is drained. Every request is recorded as `"METHOD path?query"`.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), Scripted>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on_get_sequence(path, &[(status, body.to_string())])
    }

    /// Add a sequence of responses for successive GET requests on a path
    pub fn on_get_sequence(self, path: &str, responses: &[(u16, String)]) -> Self {
        self.push(
            path,
            responses
                .iter()
                .map(|(status, body)| Reply::Respond(*status, body.clone())),
        )
    }

    /// Leave the next GET on a path unanswered. Once it is the last scripted
    /// reply, every later request on the path hangs as well.
    pub fn then_stall(self, path: &str) -> Self {
        self.push(path, [Reply::Stall])
    }

    fn push(self, path: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(("GET".to_string(), path.to_string()))
            .or_default()
            .extend(replies);
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<Reply> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone());
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path_and_query));

        let reply = self
            .next_response(&method, &path)
            .unwrap_or_else(|| Reply::Respond(404, not_found_json("path", &path)));

        Box::pin(async move {
            let (status, body) = match reply {
                Reply::Respond(status, body) => (status, body),
                Reply::Stall => std::future::pending().await,
            };
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock pod JSON response
pub fn pod_json(namespace: &str, name: &str, phase: Option<&str>) -> String {
    let mut pod = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name),
            "resourceVersion": "1"
        }
    });
    if let Some(phase) = phase {
        pod["status"] = serde_json::json!({ "phase": phase });
    }
    pod.to_string()
}

/// Create a mock pod list JSON response from pod JSON documents
pub fn pod_list_json(pods: &[String]) -> String {
    let items: Vec<serde_json::Value> = pods
        .iter()
        .map(|p| serde_json::from_str(p).unwrap())
        .collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PodList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Render watch events as the newline-delimited stream the API server sends,
/// e.g. `watch_events_json(&[("ADDED", pod_json(..))])`
pub fn watch_events_json(events: &[(&str, String)]) -> String {
    events
        .iter()
        .map(|(kind, object)| {
            let object: serde_json::Value = serde_json::from_str(object).unwrap();
            format!("{}\n", serde_json::json!({ "type": kind, "object": object }))
        })
        .collect()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    error_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a failure Status response
pub fn error_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
