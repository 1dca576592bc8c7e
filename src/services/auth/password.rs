//! 비밀번호 해싱
//!
//! 해시 형식은 bcrypt이며, 비용(cost)은 환경별 설정([`PasswordConfig`])을 따릅니다.
//!
//! [`PasswordConfig`]: crate::config::PasswordConfig

use crate::core::errors::{AppResult, ErrorContext};

/// 단방향 비밀번호 해시 계약
pub trait PasswordHasher: Send + Sync {
    /// 평문 비밀번호를 해시합니다.
    fn hash(&self, plain: &str) -> AppResult<String>;

    /// 평문이 해시와 일치하는지 확인합니다.
    ///
    /// 해시 형식이 잘못되었으면 `false`입니다.
    fn matches(&self, plain: &str, hash: &str) -> bool;
}

/// bcrypt 비밀번호 해셔
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let hashed = bcrypt::hash(plain, self.cost).context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(hashed)
    }

    fn matches(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or_else(|e| {
            log::warn!("비밀번호 해시 검증 불가: {}", e);
            false
        })
    }
}
