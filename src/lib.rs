//! # storefront
//!
//! 用户与产品的 CRUD 服务：
//! - core: 错误类型、请求解码、中间件
//! - app: 用户/产品处理器、服务以及查询结果投影
//! - infrastructure: 配置、日志、PostgreSQL 与内存存储

pub mod app;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, middleware, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{create_routes, AppState};
use crate::core::middleware::{handle_timeout_error, request_logging_middleware};
use crate::infrastructure::{config::HttpConfig, repository::Repository};

/// 组装路由、中间件和共享状态
pub fn build_app(repo: Arc<dyn Repository>, http: &HttpConfig) -> Router {
    create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    http.request_timeout_secs,
                ))),
        )
        .with_state(AppState::new(repo))
}
