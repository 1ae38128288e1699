use super::http::HttpTransport;
use super::transport::{Transport, TransportError, TransportRequest, TransportResponse};
use gebeta_core::constants::{error_codes, SDK_VERSION};
use gebeta_core::{ClientConfig, Logger, MapError, Result, TracingLogger, Validator};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// 请求客户端
///
/// 负责构建请求头、发起请求，并把非200的响应和传输层失败统一转换为 [`MapError`]。
/// 配置在构造后不可变，可以在并发调用之间共享。
#[derive(Clone)]
pub struct RequestClient {
    config: ClientConfig,
    logger: Arc<dyn Logger>,
    transport: Arc<dyn Transport>,
    validator: Validator,
}

impl RequestClient {
    /// 使用默认的 reqwest 传输层和 tracing 日志
    pub fn new(config: ClientConfig) -> Self {
        let logger = Arc::new(TracingLogger::new(config.debug));
        Self::with_transport(config, Arc::new(HttpTransport::new()), logger)
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config: config.resolved(),
            logger,
            transport,
            validator: Validator::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// 构建请求头，自定义请求头覆盖默认值（名称不区分大小写）
    pub fn build_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-SDK-Version".to_string(), SDK_VERSION.to_string()),
            (
                "User-Agent".to_string(),
                format!("MapSDK/{} Rust", SDK_VERSION),
            ),
        ];

        let mut custom: Vec<(&String, &String)> = self.config.headers.iter().collect();
        custom.sort();
        for (name, value) in custom {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        headers
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url(), endpoint)
    }

    /// 发起请求
    ///
    /// 只有状态码恰好为200才算成功，其它状态码（包括其它2xx）都走错误映射。
    pub async fn make_request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        query: Vec<(String, String)>,
    ) -> Result<Value> {
        let request = TransportRequest {
            method: method.clone(),
            url: self.url(endpoint),
            headers: self.build_headers(),
            body,
            query,
            timeout: self.config.timeout_duration(),
        };

        match self.transport.send(request).await {
            Ok(response) if response.status == 200 => {
                self.logger.debug(
                    "Request successful",
                    json!({
                        "endpoint": endpoint,
                        "method": method.as_str(),
                        "status": response.status,
                    }),
                );
                Ok(response.body)
            }
            Ok(TransportResponse { status, body })
            | Err(TransportError::Response { status, body }) => {
                self.logger.error(
                    "Request failed",
                    json!({
                        "error": &body,
                        "endpoint": endpoint,
                        "method": method.as_str(),
                    }),
                );
                Err(map_error_response(status, &body))
            }
            Err(TransportError::NoResponse { message }) => {
                self.logger.error(
                    "No response received",
                    json!({
                        "endpoint": endpoint,
                        "method": method.as_str(),
                    }),
                );
                Err(network_failure(message))
            }
            Err(TransportError::Setup { message }) => {
                self.logger.error(
                    "Request error",
                    json!({
                        "error": &message,
                        "endpoint": endpoint,
                        "method": method.as_str(),
                    }),
                );
                Err(network_failure(message))
            }
        }
    }
}

fn network_failure(message: String) -> MapError {
    MapError::network(
        "Network request failed",
        Some(json!({ "originalError": message })),
    )
}

/// 把错误响应映射为 [`MapError`]
///
/// 消息和详情优先取响应体中的 `error` 对象。
pub fn map_error_response(status: u16, body: &Value) -> MapError {
    let error = body.get("error");
    let field = |name: &str| {
        error
            .and_then(|e| e.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };
    let details = error
        .and_then(|e| e.get("details"))
        .filter(|d| !d.is_null())
        .cloned();
    let message = |default: &str| field("message").unwrap_or(default).to_string();

    match status {
        401 => MapError::auth(message("Authentication failed"), details),
        403 => MapError::auth(message("Access forbidden"), details),
        429 => MapError::api(
            error_codes::RATE_LIMIT_EXCEEDED,
            message("Rate limit exceeded"),
            status,
            details,
        ),
        _ => MapError::api(
            field("code").unwrap_or(error_codes::API),
            message("API request failed"),
            status,
            details,
        ),
    }
}
