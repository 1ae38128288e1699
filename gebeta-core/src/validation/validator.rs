use crate::config::model::ClientConfig;
use crate::error::{MapError, Result};
use crate::geo::GeoPoint;
use serde_json::{json, Map, Value};

const INVALID_LAT_LNG: &str = "Invalid LatLng object";
const NOT_NUMBERS: &str = "Latitude and longitude must be numbers";
const LATITUDE_RANGE: &str = "Latitude must be between -90 and 90";
const LONGITUDE_RANGE: &str = "Longitude must be between -180 and 180";

/// 输入校验器
///
/// 所有方法都是纯函数：成功时不返回任何值，失败时返回 [`MapError::Validation`]。
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// 校验坐标点
    pub fn validate_lat_lng(&self, point: &GeoPoint) -> Result<()> {
        let details = || Some(json!({ "latitude": point.latitude, "longitude": point.longitude }));

        if point.latitude.is_nan() || point.longitude.is_nan() {
            return Err(MapError::validation(NOT_NUMBERS, details()));
        }

        check_ranges(point.latitude, point.longitude, details)
    }

    /// 校验动态JSON形式的坐标点
    ///
    /// 数组能通过"是否为对象"的检查，随后在数值检查处失败。
    pub fn validate_lat_lng_value(&self, point: &Value) -> Result<()> {
        let details = || Some(point.clone());

        if !matches!(point, Value::Object(_) | Value::Array(_)) {
            return Err(MapError::validation(INVALID_LAT_LNG, details()));
        }

        let latitude = point.get("latitude").and_then(Value::as_f64);
        let longitude = point.get("longitude").and_then(Value::as_f64);
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => check_ranges(latitude, longitude, details),
            _ => Err(MapError::validation(NOT_NUMBERS, details())),
        }
    }

    pub fn validate_config(&self, config: &ClientConfig) -> Result<()> {
        if config.api_key.is_empty() {
            return Err(MapError::validation("API key is required", None));
        }
        Ok(())
    }

    /// 校验原始配置，只检查 API key 和 timeout
    pub fn validate_config_value(&self, config: &Value) -> Result<()> {
        let api_key = config.get("api_key").or_else(|| config.get("apiKey"));
        if !api_key.is_some_and(is_truthy) {
            return Err(MapError::validation("API key is required", None));
        }

        if let Some(timeout) = config.get("timeout") {
            if is_truthy(timeout) && !timeout.is_number() {
                return Err(MapError::validation("Timeout must be a number", None));
            }
        }

        Ok(())
    }

    /// 拒绝不在白名单中的选项，错误信息列出全部非法键
    pub fn validate_options(&self, options: &Map<String, Value>, allowed: &[&str]) -> Result<()> {
        let invalid: Vec<&str> = options
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();

        if !invalid.is_empty() {
            return Err(MapError::validation(
                format!("Invalid options: {}", invalid.join(", ")),
                None,
            ));
        }
        Ok(())
    }

    /// 校验位置列表：先检查非空，再逐点校验
    pub fn validate_locations(
        &self,
        operation: &str,
        locations: &[GeoPoint],
        details: impl FnOnce() -> Value,
    ) -> Result<()> {
        if locations.is_empty() {
            return Err(invalid_locations(operation, details()));
        }
        locations
            .iter()
            .try_for_each(|location| self.validate_lat_lng(location))
    }

    /// 把动态JSON形式的位置列表转换为坐标点
    ///
    /// 缺失、非数组或空数组都会在逐点校验之前失败。
    pub fn points_from_value(
        &self,
        operation: &str,
        locations: Option<&Value>,
        details: impl FnOnce() -> Value,
    ) -> Result<Vec<GeoPoint>> {
        let items = match locations {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(invalid_locations(operation, details())),
        };

        items.iter().map(|item| self.point_from_value(item)).collect()
    }

    pub fn point_from_value(&self, point: &Value) -> Result<GeoPoint> {
        self.validate_lat_lng_value(point)?;
        match (
            point.get("latitude").and_then(Value::as_f64),
            point.get("longitude").and_then(Value::as_f64),
        ) {
            (Some(latitude), Some(longitude)) => Ok(GeoPoint::new(latitude, longitude)),
            _ => Err(MapError::validation(NOT_NUMBERS, Some(point.clone()))),
        }
    }
}

fn check_ranges(
    latitude: f64,
    longitude: f64,
    details: impl Fn() -> Option<Value>,
) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(MapError::validation(LATITUDE_RANGE, details()));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(MapError::validation(LONGITUDE_RANGE, details()));
    }
    Ok(())
}

fn invalid_locations(operation: &str, details: Value) -> MapError {
    MapError::validation(
        format!("{operation}: Invalid locations provided."),
        Some(details),
    )
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
