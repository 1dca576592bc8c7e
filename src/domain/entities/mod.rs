//! # Domain Entities Module
//!
//! 저장소에 영속되는 도메인 엔티티를 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (영속 엔티티)
//! ├── models/       ← 토큰 클레임, 정규화된 소셜 신원 등 값 객체
//! └── dto/          ← HTTP 요청/응답 객체
//! ```

pub mod users;
