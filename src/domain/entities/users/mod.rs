//! Users Entity Module
//!
//! 로컬 가입 계정과 소셜 로그인 계정을 함께 표현하는 `User` 엔티티입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! // 로컬 사용자 생성
//! let user = User::new_local("user@example.com".into(), "닉네임".into(), hashed_password);
//!
//! // OAuth 사용자 생성
//! let oauth_user = User::new_oauth(
//!     "user@gmail.com".into(),
//!     "OAuth User".into(),
//!     AuthProvider::Google,
//!     "google-sub-123".into(),
//! );
//! ```

pub mod user;
