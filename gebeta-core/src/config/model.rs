use crate::constants::{BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::error::{MapError, Result};
use crate::validation::Validator;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// 客户端配置
///
/// 构造时校验一次，之后不再修改。
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default, alias = "apiKey")]
    pub api_key: String,
    /// 请求超时（毫秒），未设置或为0时使用默认值
    #[serde(default, deserialize_with = "deserialize_timeout")]
    pub timeout: Option<u64>,
    /// 额外的请求头，与默认请求头冲突时覆盖默认值
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub debug: bool,
    /// 覆盖默认的API地址
    #[serde(default, alias = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// 从原始JSON构建配置，先做与类型无关的校验
    pub fn from_value(value: Value) -> Result<Self> {
        Validator.validate_config_value(&value)?;
        Self::parse_value(value)
    }

    /// 只反序列化不校验，用于还要与其它来源合并的配置
    pub fn parse_value(mut value: Value) -> Result<Self> {
        // 两种写法同时出现时以 snake_case 为准，与校验顺序一致
        if let Some(map) = value.as_object_mut() {
            for (snake, camel) in [("api_key", "apiKey"), ("base_url", "baseUrl")] {
                if map.contains_key(snake) {
                    map.remove(camel);
                }
            }
        }
        serde_json::from_value(value)
            .map_err(|e| MapError::validation(format!("Invalid configuration: {e}"), None))
    }

    /// 返回填充默认值后的配置
    pub fn resolved(mut self) -> Self {
        self.timeout = Some(self.timeout_ms());
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        match self.timeout {
            Some(ms) if ms > 0 => ms,
            _ => DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(BASE_URL)
    }
}

// false / null / "" 以及非正数视为未设置
fn deserialize_timeout<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(ms) => Ok(Some(ms)),
            None => Ok(n.as_f64().filter(|ms| *ms > 0.0).map(|ms| ms as u64)),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "timeout must be a number, got {other}"
        ))),
    }
}
