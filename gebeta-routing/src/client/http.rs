use super::transport::{Transport, TransportError, TransportRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::trace;

/// 基于 reqwest 的传输层
///
/// 任何状态码的响应都作为 `Ok` 返回，由请求客户端判断成功与否。
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// 使用已有的 reqwest 客户端
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::Setup {
                    message: format!("Invalid header name '{}': {}", name, e),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| TransportError::Setup {
                message: format!("Invalid value for header '{}': {}", name, e),
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        trace!(method = %request.method, url = %request.url, "dispatching request");

        let headers = Self::build_headers(&request.headers)?;
        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .headers(headers)
            .timeout(request.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify_error)?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::NoResponse {
                message: e.to_string(),
            })?;

        Ok(TransportResponse::new(status, parse_body(text)))
    }
}

// 构建阶段的错误说明请求根本没有发出
fn classify_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Setup {
            message: err.to_string(),
        }
    } else {
        TransportError::NoResponse {
            message: err.to_string(),
        }
    }
}

/// 解析响应体：JSON 原样解析，其它文本保留为字符串，空响应为 null
pub fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
