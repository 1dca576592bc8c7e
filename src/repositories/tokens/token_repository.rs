use std::sync::Arc;
use std::time::Duration;

use crate::caching::TtlStore;
use crate::core::errors::AppResult;

/// 리프레시 세션 키 접두사
pub const REFRESH_TOKEN_KEY_PREFIX: &str = "refresh_token:";

/// 사용자별 리프레시 토큰 저장소
///
/// `refresh_token:{userId}` 키 하나에 현재 리프레시 토큰을 저장합니다.
/// 모든 연산은 단일 키 연산이므로 저장소의 원자성에 기댑니다.
/// 같은 사용자에 대한 동시 갱신은 마지막 쓰기가 남습니다.
pub struct RefreshTokenRepository {
    store: Arc<dyn TtlStore>,
    ttl: Duration,
}

impl RefreshTokenRepository {
    /// # Arguments
    ///
    /// * `store` - TTL 저장소
    /// * `refresh_token_ttl_secs` - 리프레시 토큰 수명 (초)
    pub fn new(store: Arc<dyn TtlStore>, refresh_token_ttl_secs: i64) -> Self {
        Self {
            store,
            ttl: Duration::from_secs(refresh_token_ttl_secs.max(1) as u64),
        }
    }

    fn key(user_id: i64) -> String {
        format!("{}{}", REFRESH_TOKEN_KEY_PREFIX, user_id)
    }

    /// 리프레시 토큰 저장 (기존 토큰 덮어쓰기)
    ///
    /// 저장 즉시 이전 토큰은 만료 전이라도 더 이상 사용할 수 없습니다.
    pub async fn save(&self, user_id: i64, token: &str) -> AppResult<()> {
        self.store.set(&Self::key(user_id), token, self.ttl).await?;
        log::debug!("리프레시 세션 저장: 사용자 ID {}", user_id);
        Ok(())
    }

    /// 현재 저장된 리프레시 토큰
    pub async fn current(&self, user_id: i64) -> AppResult<Option<String>> {
        self.store.get(&Self::key(user_id)).await
    }

    /// 살아있는 세션이 있고 `token`과 정확히 같은지 확인
    pub async fn matches(&self, user_id: i64, token: &str) -> AppResult<bool> {
        Ok(self
            .current(user_id)
            .await?
            .is_some_and(|stored| stored.as_bytes() == token.as_bytes()))
    }

    /// 세션 삭제 (없어도 성공)
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        self.store.delete(&Self::key(user_id)).await?;
        log::debug!("리프레시 세션 삭제: 사용자 ID {}", user_id);
        Ok(())
    }
}
