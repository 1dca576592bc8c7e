//! TTL 키-값 저장소 계층
//!
//! 리프레시 세션, 이메일 인증 코드/플래그/쿨다운, OAuth state 처럼
//! 일정 시간이 지나면 자동으로 사라져야 하는 값을 보관합니다.
//! 만료는 저장소가 책임지며, 서비스 계층은 별도의 만료 스윕을 하지 않습니다.
//!
//! # 구현체
//!
//! - [`redis::RedisClient`] - Redis `SET EX` / `GET` / `GETDEL` / `DEL`
//! - [`memory::MemoryTtlStore`] - 프로세스 메모리 (개발/테스트용)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use crate::caching::TtlStore;
//!
//! store.set("email:code:a@x.com", "042917", Duration::from_secs(300)).await?;
//! let code = store.get("email:code:a@x.com").await?;
//! store.delete("email:code:a@x.com").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! STORE_BACKEND=redis              # redis | memory
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::core::errors::AppResult;

pub use memory::MemoryTtlStore;
pub use redis::RedisClient;

/// 단일 키 단위로 원자적인 TTL 키-값 저장소
///
/// 모든 연산은 단일 키에만 작용하며, 키 간 트랜잭션은 제공하지 않습니다.
#[async_trait]
pub trait TtlStore: Send + Sync {
    /// 값을 저장하고 `ttl` 이후 만료시킵니다. 기존 값은 덮어씁니다.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// 살아있는 값을 조회합니다. 없거나 만료되었으면 `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 살아있는 값을 조회하면서 삭제합니다.
    ///
    /// 같은 키에 대한 동시 호출 중 하나만 값을 받습니다.
    async fn take(&self, key: &str) -> AppResult<Option<String>>;

    /// 값을 삭제합니다. 키가 없어도 성공합니다.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
