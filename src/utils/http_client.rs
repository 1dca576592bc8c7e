//! 외부 API 호출용 HTTP 클라이언트
//!
//! 프로바이더나 메일 API가 응답하지 않아도 요청이 무기한 붙잡히지 않도록
//! 모든 클라이언트에 전체 요청 타임아웃을 겁니다.

use std::time::Duration;

use crate::core::errors::{AppResult, ErrorContext};

/// 기본 요청 타임아웃 (연결부터 본문 수신까지)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// 유휴 커넥션 유지 시간
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// 타임아웃이 설정된 `reqwest::Client`를 만듭니다.
///
/// # Errors
///
/// * `AppError::InternalError` - TLS 백엔드 초기화 실패
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build()
        .context("HTTP 클라이언트 생성 실패")
}
