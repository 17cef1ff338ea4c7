//! In-memory [`Transport`] that records every call and replays scripted
//! responses in order.

use super::transport::{ApiRequest, ApiResponse, Transport};
use super::{LinkedInClientError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Request(ApiRequest),
    PutBinary {
        url: String,
        data: Vec<u8>,
        content_type: String,
    },
}

impl RecordedCall {
    /// `"POST /posts"`, `"PUT https://upload/..."`, etc.
    pub fn describe(&self) -> String {
        match self {
            RecordedCall::Request(request) => format!("{} {}", request.method, request.path),
            RecordedCall::PutBinary { url, .. } => format!("PUT {}", url),
        }
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response. Non-2xx statuses come back as `RemoteRejected`,
    /// like the real transport. Once the queue is empty every call gets a
    /// bare 200.
    pub fn respond(self, response: ApiResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn respond_status(self, status: u16) -> Self {
        self.respond(ApiResponse {
            status,
            ..Default::default()
        })
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(ApiResponse {
            status,
            headers: HashMap::new(),
            body: body.to_string(),
        })
    }

    pub fn respond_with_header(self, status: u16, name: &str, value: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert(name.to_ascii_lowercase(), value.to_string());
        self.respond(ApiResponse {
            status,
            headers,
            body: String::new(),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn described_calls(&self) -> Vec<String> {
        self.calls().iter().map(RecordedCall::describe).collect()
    }

    /// JSON bodies of the recorded requests, in call order.
    pub fn json_bodies(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Request(ApiRequest {
                    body: super::RequestBody::Json(body),
                    ..
                }) => Some(body),
                _ => None,
            })
            .collect()
    }

    fn next_response(&self) -> Result<ApiResponse> {
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse {
                status: 200,
                ..Default::default()
            });

        if !(200..300).contains(&response.status) {
            return Err(LinkedInClientError::RemoteRejected {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::Request(request));
        self.next_response()
    }

    async fn put_binary(
        &self,
        url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall::PutBinary {
            url: url.to_string(),
            data,
            content_type: content_type.to_string(),
        });
        self.next_response()
    }
}
