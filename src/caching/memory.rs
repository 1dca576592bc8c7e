//! 프로세스 메모리 기반 TTL 저장소
//!
//! Redis 없이 서비스를 띄우거나 테스트할 때 사용합니다.
//! 만료된 항목은 읽는 시점에 제거됩니다(lazy expiry).

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::caching::TtlStore;
use crate::core::errors::AppResult;

/// DashMap 기반 TTL 저장소
///
/// `advance`로 내부 시계를 앞당겨 만료를 재현할 수 있습니다.
#[derive(Default)]
pub struct MemoryTtlStore {
    entries: DashMap<String, (String, DateTime<Utc>)>,
    /// 실제 시계에 더해지는 오프셋 (밀리초)
    clock_offset_ms: AtomicI64,
}

impl MemoryTtlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 내부 시계를 `by`만큼 앞당깁니다.
    pub fn advance(&self, by: Duration) {
        self.clock_offset_ms
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }

    /// 살아있는 키 개수 (만료된 항목은 제외)
    pub fn live_len(&self) -> usize {
        let now = self.now();
        self.entries.iter().filter(|e| e.value().1 > now).count()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::milliseconds(self.clock_offset_ms.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl TtlStore for MemoryTtlStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let expires_at = self.now() + chrono::Duration::milliseconds(ttl.as_millis() as i64);
        self.entries
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = self.now();

        if let Some(entry) = self.entries.get(key) {
            let (value, expires_at) = entry.value();
            if *expires_at > now {
                return Ok(Some(value.clone()));
            }
        }

        // 읽기 가드를 놓은 뒤 만료 항목 정리
        self.entries.remove_if(key, |_, (_, expires_at)| *expires_at <= now);
        Ok(None)
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let now = self.now();

        Ok(self
            .entries
            .remove(key)
            .and_then(|(_, (value, expires_at))| (expires_at > now).then_some(value)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
