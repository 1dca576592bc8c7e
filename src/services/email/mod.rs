//! 이메일 인증 서비스 모듈
//!
//! - [`mail_sender`] - 메일 발송 계약과 구현 (HTTP API, 로그)
//! - [`verification_service`] - 인증코드 발급/재발송/검증

pub mod mail_sender;
pub mod verification_service;

pub use mail_sender::*;
pub use verification_service::*;
