//! HTTP 服务层 - 中间件

pub mod middleware;
