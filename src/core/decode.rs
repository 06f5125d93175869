//! 请求解码
//!
//! 在访问数据库之前把路径参数和 JSON 请求体转换成强类型输入，
//! 任何格式错误都以 [`ApiError::InvalidInput`] 返回。

use std::str::FromStr;

use axum::{extract::rejection::JsonRejection, Json};
use rust_decimal::Decimal;

use super::error::ApiError;

/// 路径中的标识符种类，决定错误提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    User,
    Product,
}

impl IdField {
    fn invalid_message(self) -> &'static str {
        match self {
            IdField::User => "Invalid user ID",
            IdField::Product => "Invalid product ID",
        }
    }
}

/// 解析路径中的整数 ID
pub fn parse_id(raw: &str, field: IdField) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::invalid_input(field.invalid_message()))
}

/// 解析 JSON 请求体，失败时保留解码器给出的信息
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::InvalidInput(rejection.body_text())),
    }
}

/// 空字符串视为缺省，而不是长度为 0 的值
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// 浮点价格转换为精确小数
///
/// 使用浮点数最短的可往返十进制表示，19.99 存储为 19.99 而不是 19.989999...
pub fn decimal_price(price: f64) -> Result<Decimal, ApiError> {
    if !price.is_finite() {
        return Err(ApiError::invalid_input("Invalid price format"));
    }
    let decimal = Decimal::from_str(&price.to_string())
        .map_err(|_| ApiError::invalid_input("Invalid price format"))?;
    // 小于 Decimal 精度下限的非零值会被截成 0
    if decimal.is_zero() && price != 0.0 {
        return Err(ApiError::invalid_input("Invalid price format"));
    }
    Ok(decimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", IdField::User).unwrap(), 42);
        assert_eq!(parse_id("-3", IdField::Product).unwrap(), -3);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("abc", IdField::User).unwrap_err();
        assert_eq!(err.to_string(), "Invalid user ID");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = parse_id("", IdField::Product).unwrap_err();
        assert_eq!(err.to_string(), "Invalid product ID");

        // 超出 i32 范围
        assert!(parse_id("99999999999", IdField::User).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(String::new())), None);
        assert_eq!(
            optional_text(Some("0123".to_string())),
            Some("0123".to_string())
        );
    }

    #[test]
    fn test_decimal_price_is_exact() {
        assert_eq!(decimal_price(19.99).unwrap(), Decimal::new(1999, 2));
        assert_eq!(decimal_price(0.1).unwrap(), Decimal::new(1, 1));
        assert_eq!(decimal_price(100.0).unwrap(), Decimal::new(100, 0));
        assert_eq!(decimal_price(1234.5678).unwrap(), Decimal::new(12345678, 4));
    }

    #[test]
    fn test_decimal_price_rejects_unrepresentable() {
        assert!(decimal_price(f64::NAN).is_err());
        assert!(decimal_price(f64::INFINITY).is_err());
        let err = decimal_price(1e40).unwrap_err();
        assert_eq!(err.to_string(), "Invalid price format");
    }

    #[test]
    fn test_decimal_price_rejects_vanishing_values() {
        let err = decimal_price(1e-30).unwrap_err();
        assert_eq!(err.to_string(), "Invalid price format");
        assert!(decimal_price(-1e-30).is_err());

        assert_eq!(decimal_price(0.0).unwrap(), Decimal::ZERO);
        assert_eq!(decimal_price(-0.0).unwrap(), Decimal::ZERO);
        assert_eq!(decimal_price(1e-5).unwrap(), Decimal::new(1, 5));
    }
}
