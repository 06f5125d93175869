//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 只携带提示信息的响应，如删除成功
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(storage: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            storage: storage.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
