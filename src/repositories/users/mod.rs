//! 사용자 데이터 액세스 계층
//!
//! [`UserStore`](user_repo::UserStore) 계약과 MongoDB/메모리 구현체를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::{MongoUserRepository, UserStore};
//!
//! let repo = MongoUserRepository::new(&database).await?;
//! let user = repo.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
