use crate::constants::error_codes;
use serde_json::{json, Value};
use thiserror::Error;

/// 客户端操作的结果类型
pub type Result<T> = std::result::Result<T, MapError>;

/// SDK错误类型
///
/// 所有变体共享同一组字段：`code`、`message`、`status`、`details`。
/// 除 `Api` 外，各变体的 code 和 status 都是固定的。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// 通用API错误，包括限流（`RATE_LIMIT_EXCEEDED`）
    #[error("{message}")]
    Api {
        code: String,
        message: String,
        status: u16,
        details: Option<Value>,
    },
    /// 客户端输入校验失败，不会发出网络请求
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },
    /// 没有拿到可用的响应
    #[error("{message}")]
    Network {
        message: String,
        details: Option<Value>,
    },
    /// 401 / 403
    #[error("{message}")]
    Auth {
        message: String,
        details: Option<Value>,
    },
}

impl MapError {
    pub fn api(
        code: impl Into<String>,
        message: impl Into<String>,
        status: u16,
        details: Option<Value>,
    ) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
            status,
            details,
        }
    }

    pub fn validation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn network(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Network {
            message: message.into(),
            details,
        }
    }

    pub fn auth(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Auth {
            message: message.into(),
            details,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            MapError::Api { code, .. } => code,
            MapError::Validation { .. } => error_codes::VALIDATION,
            MapError::Network { .. } => error_codes::NETWORK,
            MapError::Auth { .. } => error_codes::AUTH,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MapError::Api { message, .. }
            | MapError::Validation { message, .. }
            | MapError::Network { message, .. }
            | MapError::Auth { message, .. } => message,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            MapError::Api { status, .. } => *status,
            MapError::Validation { .. } => 400,
            MapError::Network { .. } => 500,
            MapError::Auth { .. } => 401,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            MapError::Api { details, .. }
            | MapError::Validation { details, .. }
            | MapError::Network { details, .. }
            | MapError::Auth { details, .. } => details.as_ref(),
        }
    }

    /// 是否为限流错误（429）
    pub fn is_rate_limited(&self) -> bool {
        self.code() == error_codes::RATE_LIMIT_EXCEEDED
    }

    /// 转换为 `{code, message, status, details}` 形式的JSON
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.message(),
            "status": self.status(),
            "details": self.details(),
        })
    }
}
