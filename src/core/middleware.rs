//! 核心中间件模块

use axum::{
    extract::Request,
    BoxError,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, Instrument};
use tower::timeout::error::Elapsed;
use uuid::Uuid;

use super::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// 为每个请求分配 request id，写入响应头并记录耗时。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!("request", %method, %uri, request_id = %request_id);
    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let duration = start.elapsed();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    span.in_scope(|| {
        info!(
            status = status.as_u16(),
            latency_ms = duration.as_millis() as u64,
            "{} {} - {}",
            method,
            uri,
            status
        );
    });

    response
}

/// 超时层的错误转换为带 JSON 错误体的 408
pub async fn handle_timeout_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::StorageFailure(format!("unhandled middleware error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_elapsed_becomes_timeout() {
        let err = handle_timeout_error(Box::new(Elapsed::new())).await;
        assert!(matches!(err, ApiError::Timeout));

        let err = handle_timeout_error("boom".into()).await;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
