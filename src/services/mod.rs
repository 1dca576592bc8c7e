//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 싱글톤이 아니라 시작 시 [`AppContext`]에서 한 번 조립되어
//! `web::Data`로 핸들러에 전달됩니다.
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 발급, 검증, 회전
//! - 이메일 인증코드 기반 회원가입
//! - OAuth 2.0 소셜 로그인 (Google, Kakao)
//!
//! [`AppContext`]: crate::core::context::AppContext

pub mod auth;
pub mod email;
