//! 核心层：错误、请求解码、中间件、通用响应

pub mod decode;
pub mod error;
pub mod middleware;
pub mod response;
