//! 메일 발송
//!
//! 인증코드 메일은 [`MailSender`] trait을 통해 나갑니다.
//! `MAIL_API_URL`이 설정되면 [`HttpMailSender`], 아니면 [`LogMailSender`]가 쓰입니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult};
use crate::utils::http_client::{build_http_client, DEFAULT_HTTP_TIMEOUT};

/// 메일 발송 계약
#[async_trait]
pub trait MailSender: Send + Sync {
    /// # Errors
    ///
    /// * `AppError::DeliveryFailed` - 전송 실패
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// HTTP 메일 API 발송기
///
/// `{from, to, subject, text}` JSON을 API 엔드포인트로 POST합니다.
pub struct HttpMailSender {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from_address: String,
}

impl HttpMailSender {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        from_address: impl Into<String>,
    ) -> AppResult<Self> {
        Self::with_timeout(api_url, api_key, from_address, DEFAULT_HTTP_TIMEOUT)
    }

    /// 메일 API 호출 타임아웃을 지정해 생성합니다.
    pub fn with_timeout(
        api_url: impl Into<String>,
        api_key: Option<String>,
        from_address: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            api_url: api_url.into(),
            api_key,
            from_address: from_address.into(),
        })
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let payload = MailPayload {
            from: &self.from_address,
            to,
            subject,
            text: body,
        };

        let mut request = self.http.post(&self.api_url).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DeliveryFailed(format!("메일 API 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::DeliveryFailed(format!(
                "메일 API 응답 오류 {}: {}",
                status, error_text
            )));
        }

        log::info!("인증 메일 발송 완료: {}", to);
        Ok(())
    }
}

/// 로그 발송기
///
/// 메일 API가 없는 개발 환경에서 메일 내용을 로그로만 남깁니다.
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        log::info!("[메일 미발송] to={} subject={}", to, subject);
        log::debug!("[메일 본문] {}", body);
        Ok(())
    }
}

/// 메일 설정에 맞는 발송기 선택
///
/// # Errors
///
/// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
pub fn mail_sender_from_config(config: &MailConfig) -> AppResult<Arc<dyn MailSender>> {
    match &config.api_url {
        Some(api_url) => Ok(Arc::new(HttpMailSender::new(
            api_url.clone(),
            config.api_key.clone(),
            config.from_address.clone(),
        )?)),
        None => {
            log::warn!("MAIL_API_URL 미설정: 인증 메일을 로그로만 출력합니다");
            Ok(Arc::new(LogMailSender))
        }
    }
}
