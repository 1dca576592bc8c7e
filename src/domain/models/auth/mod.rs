//! 요청 단위 인증 모델
//!
//! - [`authenticated_user`] - 미들웨어가 해석해 요청 확장에 넣는 사용자
//! - [`auth_mode`] - 라우트별 인증 요구 수준

pub mod auth_mode;
pub mod authenticated_user;
