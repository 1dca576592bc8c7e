//! # Domain Models Module
//!
//! 영속되지 않는 값 객체들입니다.
//!
//! - [`auth`] - 요청 단위로 해석된 인증 사용자, 인증 모드
//! - [`oauth`] - 프로바이더별 응답을 정규화한 소셜 신원
//! - [`token`] - JWT 클레임과 토큰 종류

pub mod auth;
pub mod oauth;
pub mod token;
