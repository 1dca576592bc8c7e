//! 인증 및 보안 서비스 모듈
//!
//! JWT 토큰 코덱, 비밀번호 해싱, OAuth 2.0 소셜 로그인, 그리고
//! 이들을 묶는 인증 오케스트레이터를 제공합니다.
//!
//! # Modules
//!
//! - [`token_service`] - HS256 액세스/리프레시 토큰 발급과 검증
//! - [`password`] - bcrypt 비밀번호 해셔
//! - [`oauth_normalizer`] - 프로바이더 응답 → [`CanonicalIdentity`]
//! - [`oauth_client`] - Authorization Code 플로우 HTTP 클라이언트
//! - [`auth_service`] - 회원가입/로그인/갱신/로그아웃/소셜 로그인/토큰 해석
//!
//! # Examples
//!
//! ```rust,ignore
//! use sparring_auth::services::auth::AuthService;
//!
//! let response = auth_service.login(LoginRequest { email, password }).await?;
//! let user = auth_service.resolve_identity("Bearer eyJ...").await?;
//! ```
//!
//! [`CanonicalIdentity`]: crate::domain::models::oauth::CanonicalIdentity

pub mod auth_service;
pub mod oauth_client;
pub mod oauth_normalizer;
pub mod password;
pub mod token_service;

pub use auth_service::*;
pub use oauth_client::*;
pub use password::*;
pub use token_service::*;
