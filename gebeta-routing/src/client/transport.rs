use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// 单次请求的描述，每次调用重新构建
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// 完整URL（基础地址 + endpoint）
    pub url: String,
    /// 有序的请求头
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// 有序的查询参数
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

/// 服务端返回的响应
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// 传输层失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// 服务端返回了错误响应
    #[error("server responded with status {status}")]
    Response { status: u16, body: Value },
    /// 请求已发出但没有收到响应
    #[error("{message}")]
    NoResponse { message: String },
    /// 请求未能发出
    #[error("{message}")]
    Setup { message: String },
}

/// HTTP 传输层接口，超时由实现负责
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
