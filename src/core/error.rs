//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::infrastructure::repository::StoreError;

/// 核心错误类型
///
/// 处理器只产生两类：请求解析失败 (400) 与存储层失败 (500)。
/// "未找到" 不单独处理，同样归为存储层失败。超时 (408) 由超时层产生。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    StorageFailure(String),
    #[error("request timed out")]
    Timeout,
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub code: u16,
    pub timestamp: String,
}

impl ApiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ApiError::InvalidInput(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::StorageFailure(_) => "STORAGE_FAILURE",
            ApiError::Timeout => "TIMEOUT",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StorageFailure(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidInput(msg) => warn!(%status, "rejected request: {}", msg),
            ApiError::StorageFailure(msg) => error!(%status, "storage failure: {}", msg),
            ApiError::Timeout => warn!(%status, "request timed out"),
        }

        let error_response = ErrorResponse {
            kind: self.kind().to_string(),
            error: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::invalid_input("Invalid user ID").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StorageFailure("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_is_storage_failure() {
        let err: ApiError = StoreError::NotFound("user").into();
        assert!(matches!(err, ApiError::StorageFailure(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_is_preserved() {
        let err = ApiError::invalid_input("Invalid product ID");
        assert_eq!(err.to_string(), "Invalid product ID");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_timeout_mapping() {
        let err = ApiError::Timeout;
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.kind(), "TIMEOUT");
        assert_eq!(err.into_response().status(), StatusCode::REQUEST_TIMEOUT);
    }
}
