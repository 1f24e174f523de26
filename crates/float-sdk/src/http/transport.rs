/*
[INPUT]:  Method, URL, optional JSON body, credential flag
[OUTPUT]: Parsed JSON response body or FloatError
[POS]:    HTTP layer - transport abstraction consumed by resource clients
[UPDATE]: When changing the request shape or adding transport implementations
*/

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::http::{FloatError, Result};

/// A single request issued by a resource client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
    pub with_credentials: bool,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            with_credentials: false,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }
}

/// HTTP capability used by every resource client
///
/// Implementations return the parsed success body (`null` for an empty body),
/// or a `FloatError` carrying the structured error body when the server sent one.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Canned reply for `MockTransport`
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status { status: u16, body: Value },
}

/// In-memory transport for testing
///
/// Replies are consumed in FIFO order; every request is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply_json(&self, body: Value) -> &Self {
        self.push(MockReply::Json(body))
    }

    /// Queue an error reply
    pub fn reply_status(&self, status: u16, body: Value) -> &Self {
        self.push(MockReply::Status { status, body })
    }

    /// All requests sent so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, reply: MockReply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match reply {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Status { status, body }) => {
                let status = StatusCode::from_u16(status)
                    .map_err(|e| FloatError::Config(format!("invalid mock status: {e}")))?;
                let bytes = serde_json::to_vec(&body)?;
                Err(FloatError::from_response(status, &bytes))
            }
            None => Err(FloatError::Http { status: 501 }),
        }
    }
}
