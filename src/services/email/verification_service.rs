//! # 이메일 인증 서비스
//!
//! 회원가입 전 이메일 소유 확인을 위한 6자리 인증코드를 발급하고 검증합니다.
//! 모든 상태는 TTL 저장소에 있으며 만료는 저장소가 처리합니다.
//!
//! ## 저장 키
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `email:code:{email}` | 6자리 코드 | 5분 |
//! | `email:verified:{email}` | `"true"` | 30분 |
//! | `email:cooldown:{email}` | `"true"` | 60초 (재발송 전용) |
//!
//! ## 흐름
//!
//! ```text
//! issue_code ──▶ verify(성공) ──▶ verified 플래그 ──▶ 회원가입 시 확인 후 삭제
//!      ▲
//! resend_code (쿨다운 중이면 TooManyRequests)
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::caching::TtlStore;
use crate::core::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserStore;
use crate::services::email::mail_sender::MailSender;

pub const CODE_KEY_PREFIX: &str = "email:code:";
pub const VERIFIED_KEY_PREFIX: &str = "email:verified:";
pub const COOLDOWN_KEY_PREFIX: &str = "email:cooldown:";

const CODE_TTL: Duration = Duration::from_secs(5 * 60);
const VERIFIED_TTL: Duration = Duration::from_secs(30 * 60);
const RESEND_COOLDOWN: Duration = Duration::from_secs(60);
const FLAG_VALUE: &str = "true";

/// 이메일 인증 서비스
pub struct VerificationService {
    store: Arc<dyn TtlStore>,
    users: Arc<dyn UserStore>,
    mail: Arc<dyn MailSender>,
    service_name: String,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn TtlStore>,
        users: Arc<dyn UserStore>,
        mail: Arc<dyn MailSender>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            users,
            mail,
            service_name: service_name.into(),
        }
    }

    /// 인증코드 발급 및 메일 발송
    ///
    /// 같은 이메일로 다시 호출하면 이전 코드는 새 코드로 대체됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateEmail` - 이미 가입된 이메일
    /// * `AppError::DeliveryFailed` - 메일 전송 실패
    pub async fn issue_code(&self, email: &str) -> AppResult<String> {
        self.ensure_not_registered(email).await?;

        let code = self.store_new_code(email).await?;
        self.send_code_mail(email, &code).await?;

        log::info!("이메일 인증코드 발송 완료: {}", email);
        Ok(code)
    }

    /// 인증코드 재발송
    ///
    /// 쿨다운(60초)은 재발송에서만 기록하고 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::TooManyRequests` - 쿨다운 중
    /// * `AppError::DuplicateEmail` - 이미 가입된 이메일
    /// * `AppError::DeliveryFailed` - 메일 전송 실패
    pub async fn resend_code(&self, email: &str) -> AppResult<String> {
        let cooldown_key = Self::key(COOLDOWN_KEY_PREFIX, email);
        if self.store.get(&cooldown_key).await?.is_some() {
            log::warn!("인증코드 재발송 쿨다운 중: {}", email);
            return Err(AppError::TooManyRequests);
        }

        self.ensure_not_registered(email).await?;

        let code = self.store_new_code(email).await?;
        self.store
            .set(&cooldown_key, FLAG_VALUE, RESEND_COOLDOWN)
            .await?;
        self.send_code_mail(email, &code).await?;

        log::info!("이메일 인증코드 재발송 완료: {}", email);
        Ok(code)
    }

    /// 제출된 인증코드 검증
    ///
    /// 일치하면 코드를 지우고 30분짜리 인증 완료 플래그를 남깁니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExpiredCode` - 코드가 없거나 만료됨 (이미 사용된 코드 포함)
    /// * `AppError::InvalidCode` - 코드 불일치
    pub async fn verify(&self, email: &str, submitted: &str) -> AppResult<()> {
        let code_key = Self::key(CODE_KEY_PREFIX, email);
        let saved = self
            .store
            .get(&code_key)
            .await?
            .ok_or(AppError::ExpiredCode)?;

        if saved != submitted {
            log::warn!("인증코드 불일치: {}", email);
            return Err(AppError::InvalidCode);
        }

        self.store
            .set(&Self::key(VERIFIED_KEY_PREFIX, email), FLAG_VALUE, VERIFIED_TTL)
            .await?;
        self.store.delete(&code_key).await?;

        log::info!("이메일 인증 완료: {}", email);
        Ok(())
    }

    /// 인증 완료 플래그 확인
    pub async fn is_verified(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .store
            .get(&Self::key(VERIFIED_KEY_PREFIX, email))
            .await?
            .is_some_and(|v| v == FLAG_VALUE))
    }

    /// 인증 완료 플래그 삭제
    pub async fn clear_verified(&self, email: &str) -> AppResult<()> {
        self.store
            .delete(&Self::key(VERIFIED_KEY_PREFIX, email))
            .await
    }

    async fn ensure_not_registered(&self, email: &str) -> AppResult<()> {
        if self.users.exists_by_email(email).await? {
            return Err(AppError::DuplicateEmail);
        }
        Ok(())
    }

    async fn store_new_code(&self, email: &str) -> AppResult<String> {
        let code = generate_code();
        self.store
            .set(&Self::key(CODE_KEY_PREFIX, email), &code, CODE_TTL)
            .await?;
        Ok(code)
    }

    async fn send_code_mail(&self, email: &str, code: &str) -> AppResult<()> {
        let subject = format!("[{}] 이메일 인증코드", self.service_name);
        let body = verification_mail_body(&self.service_name, code);

        self.mail.send(email, &subject, &body).await.map_err(|e| {
            log::error!("이메일 발송 실패: {}: {}", email, e);
            e
        })
    }

    fn key(prefix: &str, email: &str) -> String {
        format!("{}{}", prefix, email)
    }
}

/// 0으로 채운 6자리 숫자 코드
fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

fn verification_mail_body(service_name: &str, code: &str) -> String {
    format!(
        "안녕하세요. {}입니다.\n\n\
         아래 인증코드를 입력하여 이메일 인증을 완료해주세요.\n\n\
         인증코드: {}\n\n\
         이 코드는 5분간 유효합니다.\n\n\
         감사합니다.",
        service_name, code
    )
}
