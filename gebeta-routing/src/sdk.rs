use crate::client::Transport;
use crate::service::RoutingService;
use gebeta_core::{ClientConfig, Logger, Result, Validator};
use serde_json::Value;
use std::sync::Arc;

/// SDK入口
///
/// 构造时校验配置，然后提供 [`RoutingService`]。
#[derive(Clone)]
pub struct MapSdk {
    service: RoutingService,
}

impl MapSdk {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Validator::new().validate_config(&config)?;
        Ok(Self {
            service: RoutingService::new(config),
        })
    }

    /// 从原始JSON配置构建
    pub fn from_value(config: Value) -> Result<Self> {
        Self::new(ClientConfig::from_value(config)?)
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        Validator::new().validate_config(&config)?;
        Ok(Self {
            service: RoutingService::with_transport(config, transport, logger),
        })
    }

    pub fn service(&self) -> &RoutingService {
        &self.service
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
