//! Geographic point type and the provider's point encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 经纬度坐标点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 编码为 `{lat,lon}`，花括号是字面量，不是JSON
    pub fn encode(&self) -> String {
        format!(
            "{{{},{}}}",
            format_coordinate(self.latitude),
            format_coordinate(self.longitude)
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// 以逗号连接多个点，不加方括号；空列表得到空字符串
pub fn encode_points(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(GeoPoint::encode)
        .collect::<Vec<_>>()
        .join(",")
}

/// 坐标数字的文本形式，与服务端约定的写法一致：
/// 最短往返数字，`1.0` 写作 `1`，`-0` 写作 `0`，
/// 十进制指数小于 -6 或不小于 21 时改用 `1e-7` / `1e+21` 形式。
fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // `{:e}` 给出最短往返的有效数字，如 1234.5 -> "1.2345e3"
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, (n - 1).abs())
        }
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}
