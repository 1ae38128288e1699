//! 单元测试用的传输层和日志替身

use crate::client::{Transport, TransportError, TransportRequest, TransportResponse};
use async_trait::async_trait;
use gebeta_core::Logger;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// 按顺序返回预设结果，并记录收到的请求；没有预设时返回 200
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, json!({ "ok": true }))))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: &'static str,
    pub message: String,
    pub meta: Value,
}

/// 记录所有日志条目
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn record(&self, level: &'static str, message: &str, meta: Value) {
        self.entries.lock().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
            meta,
        });
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str, meta: Value) {
        self.record("info", message, meta);
    }

    fn error(&self, message: &str, meta: Value) {
        self.record("error", message, meta);
    }

    fn debug(&self, message: &str, meta: Value) {
        self.record("debug", message, meta);
    }
}
