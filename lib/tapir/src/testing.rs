//! In-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use bytes::Bytes;
use serde_json::Value;

use crate::{HttpClient, Request, Response, Result};

/// Records every request and answers from a queue of canned responses.
///
/// The last queued response keeps answering once the queue drains.
#[derive(Debug)]
pub(crate) struct RecordingClient {
    replies: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

fn json_response(status: u16, body: &Value) -> Response {
    let headers = HashMap::from([(
        "content-type".to_string(),
        "application/json".to_string(),
    )]);
    Response::new(status, headers, Bytes::from(body.to_string()))
}

impl RecordingClient {
    pub(crate) fn json(status: u16, body: Value) -> Self {
        Self::replies([json_response(status, &body)])
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        let headers = HashMap::from([("content-type".to_string(), "text/plain".to_string())]);
        let body = Bytes::from(body.to_string());
        Self::replies([Response::new(status, headers, body)])
    }

    pub(crate) fn json_pages(bodies: impl IntoIterator<Item = Value>) -> Self {
        Self::replies(bodies.into_iter().map(|body| json_response(200, &body)))
    }

    fn replies(replies: impl IntoIterator<Item = Response>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("lock").clone()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request.url().to_string())
            .collect()
    }
}

impl HttpClient for RecordingClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.requests.lock().expect("lock").push(request);
        let mut replies = self.replies.lock().expect("lock");
        let response = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        Ok(response.unwrap_or_else(|| json_response(200, &Value::Null)))
    }
}
