//! 스파링 인증 서비스
//!
//! 이메일/비밀번호 회원가입과 로그인, 소셜 로그인(Google, Kakao),
//! 그리고 액세스/리프레시 토큰 세션 수명주기를 담당하는 서비스입니다.
//!
//! # Features
//!
//! - **JWT 인증**: HS256 서명 액세스/리프레시 토큰
//! - **리프레시 세션**: 사용자당 하나의 유효한 리프레시 토큰 (회전 방식)
//! - **이메일 인증**: 6자리 코드 발송, 재발송 쿨다운, 인증 완료 플래그
//! - **OAuth 2.0**: Google, Kakao 사용자 정보를 공통 신원으로 정규화
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: TTL 기반 세션, 인증코드, OAuth state 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 인증 오케스트레이션, 토큰, 이메일 인증, OAuth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 사용자 저장소, 리프레시 세션 저장소
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소 (테스트에서는 인메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use sparring_auth::config::AppConfig;
//! use sparring_auth::core::context::AppContext;
//!
//! let context = AppContext::build(AppConfig::from_env()?).await?;
//! let session = context.auth.login(request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
mod test_support;
