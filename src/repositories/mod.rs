//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! - [`users`] - 사용자 엔티티 저장소 (MongoDB / 메모리)
//! - [`tokens`] - 사용자별 리프레시 세션 저장소 (TTL 저장소 위)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserStore;
//!
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod tokens;
