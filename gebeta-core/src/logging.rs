//! 日志能力
//!
//! 请求客户端通过 [`Logger`] 输出结构化日志。默认实现 [`TracingLogger`] 走 `tracing`，
//! info/debug 只在调试模式下输出，error 始终输出。

use serde_json::Value;
use tracing::{debug, error, info};

/// 带级别的结构化日志接口
pub trait Logger: Send + Sync {
    fn info(&self, message: &str, meta: Value);

    fn error(&self, message: &str, meta: Value);

    fn debug(&self, message: &str, meta: Value);
}

/// 基于 tracing 的日志实现
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    debug_mode: bool,
}

impl TracingLogger {
    pub fn new(debug_mode: bool) -> Self {
        Self { debug_mode }
    }

    pub fn is_debug(&self) -> bool {
        self.debug_mode
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str, meta: Value) {
        if self.debug_mode {
            info!(target: "gebeta", meta = %meta, "{}", message);
        }
    }

    fn error(&self, message: &str, meta: Value) {
        error!(target: "gebeta", meta = %meta, "{}", message);
    }

    fn debug(&self, message: &str, meta: Value) {
        if self.debug_mode {
            debug!(target: "gebeta", meta = %meta, "{}", message);
        }
    }
}

/// 丢弃所有日志
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str, _meta: Value) {}

    fn error(&self, _message: &str, _meta: Value) {}

    fn debug(&self, _message: &str, _meta: Value) {}
}
