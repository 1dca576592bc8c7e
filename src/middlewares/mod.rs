//! HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - 액세스 토큰 기반 요청 인증

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
