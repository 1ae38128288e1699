use crate::config::model::ClientConfig;
use anyhow::Context;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "gebeta.toml";

/// 读取工作目录下的默认配置文件，不存在时返回 `None`
pub fn load_config() -> Result<Option<ClientConfig>, anyhow::Error> {
    if !Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Ok(None);
    }
    load_config_from_path(DEFAULT_CONFIG_PATH).map(Some)
}

pub fn load_config_from_path(config_path: &str) -> Result<ClientConfig, anyhow::Error> {
    let config_str = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", config_path))?;
    load_config_from_str(&config_str)
}

/// 解析TOML配置
///
/// 不检查 API key，命令行和环境变量还可能补上；校验在构建 SDK 时进行。
pub fn load_config_from_str(config_str: &str) -> Result<ClientConfig, anyhow::Error> {
    let raw: toml::Value = toml::from_str(config_str)?;
    let config = ClientConfig::parse_value(serde_json::to_value(raw)?)?;
    Ok(config)
}
