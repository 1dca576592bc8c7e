//! # Data Transfer Objects
//!
//! HTTP 요청 본문/쿼리와 응답 본문 구조체입니다.
//! 요청 DTO는 `validator`로 형식을 검증하고, 응답 DTO는 camelCase JSON으로 직렬화됩니다.

pub mod auth;

pub use auth::*;
