//! 리프레시 세션 리포지토리 모듈
//!
//! 사용자당 하나의 살아있는 리프레시 토큰만 TTL 저장소에 보관합니다.
//!
//! # Features
//!
//! - **회전(rotation)**: 새 토큰 저장 시 기존 토큰을 즉시 대체
//! - **정확한 일치 검사**: 저장된 토큰과 바이트 단위로 같을 때만 유효
//! - **TTL 자동 관리**: 리프레시 토큰 수명과 동일한 TTL
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::RefreshTokenRepository;
//!
//! sessions.save(user_id, &refresh_token).await?;
//! if !sessions.matches(user_id, &presented).await? {
//!     return Err(AppError::InvalidToken);
//! }
//! sessions.delete(user_id).await?;
//! ```

pub mod token_repository;

pub use token_repository::*;
