//! 产品数据模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    decode::{decimal_price, optional_text},
    error::ApiError,
};

/// products 表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 创建产品请求
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub user_id: i32,
}

/// 更新产品请求
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            price: decimal_price(req.price)?,
            name: req.name,
            description: optional_text(req.description),
            user_id: req.user_id,
        })
    }
}

impl ProductChanges {
    pub fn from_request(id: i32, req: UpdateProductRequest) -> Result<Self, ApiError> {
        Ok(Self {
            id,
            price: decimal_price(req.price)?,
            name: req.name,
            description: optional_text(req.description),
        })
    }
}

/// products JOIN users 的平铺行，GET /products 原样返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct ProductWithUserRow {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
}

/// 单个产品详情，所属用户嵌套在 `User` 字段中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductDetail {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub user: ProductOwner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductOwner {
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_decoding() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name":"Lamp","description":"","price":19.99,"user_id":3}"#,
        )
        .unwrap();
        let new_product = NewProduct::try_from(req).unwrap();
        assert_eq!(new_product.description, None);
        assert_eq!(new_product.price, Decimal::new(1999, 2));
        assert_eq!(new_product.user_id, 3);
    }

    #[test]
    fn test_product_serializes_with_wire_names() {
        let product = Product {
            id: 1,
            name: "Lamp".to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            user_id: 7,
            created_at: None,
            updated_at: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["ID"], 1);
        assert_eq!(value["UserID"], 7);
        assert_eq!(value["Price"], "19.99");
        assert!(value.get("Description").is_none());
    }
}
