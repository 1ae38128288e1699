/// 默认请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// SDK版本，随请求头一起发送
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gebeta Maps API 地址
pub const BASE_URL: &str = "https://mapapi.gebeta.app";

pub mod error_codes {
    pub const VALIDATION: &str = "VALIDATION_ERROR";
    pub const NETWORK: &str = "NETWORK_ERROR";
    pub const AUTH: &str = "AUTH_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const API: &str = "API_ERROR";
}

pub mod endpoints {
    pub const DIRECTIONS: &str = "/api/route/direction";
    pub const MATRIX: &str = "/api/route/matrix";
    pub const ONM: &str = "/api/route/onm";
    pub const OPTIMIZATION: &str = "/api/route/tss";
}
