//! 테스트 전용 조립 도구

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::core::context::AppContext;
use crate::core::errors::{AppError, AppResult};
use crate::services::email::MailSender;

pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-at-least-32-bytes";

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 보낸 메일을 기록만 하는 발송기
#[derive(Debug, Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailSender {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// 마지막 메일 본문의 인증코드
    pub fn last_code(&self) -> Option<String> {
        let body = self.last()?.body;
        let (_, rest) = body.split_once("인증코드: ")?;
        Some(rest.chars().take(6).collect())
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// 항상 실패하는 발송기
#[derive(Debug, Default)]
pub struct FailingMailSender;

#[async_trait]
impl MailSender for FailingMailSender {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> AppResult<()> {
        Err(AppError::DeliveryFailed("smtp unreachable".to_string()))
    }
}

/// 메모리 백엔드 + 테스트 비밀키 설정
pub fn test_config() -> AppConfig {
    let lookup = |key: &str| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        "STORE_BACKEND" => Some("memory".to_string()),
        "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    };
    AppConfig::from_lookup(&lookup).unwrap()
}

/// 메모리 저장소로 조립된 컨텍스트와 메일 기록기
pub fn test_context() -> (AppContext, Arc<RecordingMailSender>) {
    let mail = Arc::new(RecordingMailSender::default());
    let context = AppContext::in_memory(test_config(), mail.clone()).unwrap();
    (context, mail)
}
