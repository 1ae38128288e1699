use crate::client::{RequestClient, Transport};
use gebeta_core::constants::endpoints;
use gebeta_core::geo::encode_points;
use gebeta_core::{ClientConfig, GeoPoint, Logger, Result};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// 路线服务
///
/// 每个操作都是：校验坐标 -> 编码为 `{lat,lon}` -> 组装查询参数（含 API key）-> GET 请求。
/// 成功时返回原始响应体，错误原样向上传递。
#[derive(Clone)]
pub struct RoutingService {
    client: RequestClient,
}

impl RoutingService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: RequestClient::new(config),
        }
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client: RequestClient::with_transport(config, transport, logger),
        }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    /// 两点之间的路线
    ///
    /// 途经点只做编码，不做校验。
    pub async fn get_directions(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        waypoints: &[GeoPoint],
        instruction: bool,
    ) -> Result<Value> {
        let validator = self.client.validator();
        validator.validate_lat_lng(origin)?;
        validator.validate_lat_lng(destination)?;

        let query = self.query([
            ("origin", origin.encode()),
            ("destination", destination.encode()),
            ("apiKey", self.api_key()),
            ("waypoints", encode_points(waypoints)),
            ("instruction", if instruction { "1" } else { "0" }.to_string()),
        ]);

        self.get(endpoints::DIRECTIONS, query).await
    }

    /// 距离矩阵
    pub async fn get_route_matrix(&self, locations: &[GeoPoint]) -> Result<Value> {
        self.client
            .validator()
            .validate_locations("getRouteMatrix", locations, || points_json(locations))?;

        let query = self.query([
            ("json", encode_points(locations)),
            ("apiKey", self.api_key()),
        ]);

        self.get(endpoints::MATRIX, query).await
    }

    /// 一对多路线
    pub async fn get_route_onm(&self, origin: &GeoPoint, locations: &[GeoPoint]) -> Result<Value> {
        let validator = self.client.validator();
        validator.validate_lat_lng(origin)?;
        validator.validate_locations("getRouteONM", locations, || {
            json!({ "origin": origin, "locations": points_json(locations) })
        })?;

        let query = self.query([
            ("origin", origin.encode()),
            ("json", encode_points(locations)),
            ("apiKey", self.api_key()),
        ]);

        self.get(endpoints::ONM, query).await
    }

    /// 路线优化（访问顺序由服务端计算）
    pub async fn get_route_optimization(&self, locations: &[GeoPoint]) -> Result<Value> {
        self.client.validator().validate_locations(
            "getRouteOptimization",
            locations,
            || points_json(locations),
        )?;

        let query = self.query([
            ("json", encode_points(locations)),
            ("apiKey", self.api_key()),
        ]);

        self.get(endpoints::OPTIMIZATION, query).await
    }

    /// 与 [`Self::get_route_matrix`] 相同，但接受动态JSON形式的位置列表
    pub async fn get_route_matrix_value(&self, locations: Option<&Value>) -> Result<Value> {
        let points = self.client.validator().points_from_value(
            "getRouteMatrix",
            locations,
            || locations.cloned().unwrap_or(Value::Null),
        )?;
        self.get_route_matrix(&points).await
    }

    pub async fn get_route_onm_value(
        &self,
        origin: &Value,
        locations: Option<&Value>,
    ) -> Result<Value> {
        let validator = self.client.validator();
        let origin_point = validator.point_from_value(origin)?;
        let points = validator.points_from_value("getRouteONM", locations, || {
            json!({ "origin": origin, "locations": locations })
        })?;
        self.get_route_onm(&origin_point, &points).await
    }

    pub async fn get_route_optimization_value(&self, locations: Option<&Value>) -> Result<Value> {
        let points = self.client.validator().points_from_value(
            "getRouteOptimization",
            locations,
            || locations.cloned().unwrap_or(Value::Null),
        )?;
        self.get_route_optimization(&points).await
    }

    fn api_key(&self) -> String {
        self.client.config().api_key.clone()
    }

    fn query<const N: usize>(&self, pairs: [(&str, String); N]) -> Vec<(String, String)> {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    // 服务端的路线接口以 `/` 结尾：`/api/route/matrix/?json=...`
    async fn get(&self, endpoint: &str, query: Vec<(String, String)>) -> Result<Value> {
        let path = format!("{}/", endpoint);
        self.client
            .make_request(&path, Method::GET, None, query)
            .await
    }
}

fn points_json(points: &[GeoPoint]) -> Value {
    json!(points)
}
