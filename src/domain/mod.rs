//! # Domain Layer
//!
//! 인증 서비스의 도메인 타입을 정의합니다.
//!
//! ```text
//! domain/
//! ├── entities/   ← User (저장소에 영속)
//! ├── models/     ← TokenClaims, CanonicalIdentity, AuthenticatedUser
//! └── dto/        ← SignupRequest, LoginRequest, AuthResponse ...
//! ```

pub mod entities;
pub mod dto;
pub mod models;
