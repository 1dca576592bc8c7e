//! # Application Error Handling System
//!
//! 인증/세션 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 모든 실패는 [`AppError`] 하나로 표현되며, 각 변형은 고정된 HTTP 상태 코드와
//! 클라이언트가 분기할 수 있는 안정적인 에러 코드(`U001`, `A001` ...)를 가집니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "error": {
//!     "code": "U003",
//!     "message": "비밀번호가 일치하지 않습니다",
//!     "timestamp": "2025-01-01T00:00:00+00:00"
//!   }
//! }
//! ```
//!
//! 메시지는 사람이 읽기 위한 값이므로 번역/변경될 수 있습니다.
//! 클라이언트는 반드시 `code` 값으로 분기해야 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | Code |
//! |----------|-------------|------|
//! | `UserNotFound` | 404 Not Found | U001 |
//! | `DuplicateEmail` | 409 Conflict | U002 |
//! | `InvalidPassword` | 401 Unauthorized | U003 |
//! | `InactiveUser` | 403 Forbidden | U004 |
//! | `InvalidToken` | 401 Unauthorized | A001 |
//! | `MalformedToken` | 401 Unauthorized | A002 |
//! | `AuthenticationError` | 401 Unauthorized | A003 |
//! | `ExpiredCode` | 400 Bad Request | E001 |
//! | `InvalidCode` | 400 Bad Request | E002 |
//! | `EmailNotVerified` | 403 Forbidden | E003 |
//! | `TooManyRequests` | 429 Too Many Requests | E004 |
//! | `DeliveryFailed` | 500 Internal Server Error | E005 |
//! | `UnsupportedProvider` | 400 Bad Request | O001 |
//! | `ValidationError` | 400 Bad Request | C001 |
//! | 인프라 에러 | 500 Internal Server Error | C002 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
//!     let user = self.users.find_by_email(email).await?
//!         .ok_or(AppError::UserNotFound)?;
//!
//!     if !self.hasher.matches(password, &user.password_hash) {
//!         return Err(AppError::InvalidPassword);
//!     }
//!     // ...
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 도메인 에러(사용자/토큰/이메일 인증/OAuth)와 인프라 에러(DB, TTL 저장소,
/// 외부 API)를 함께 표현합니다. 어떤 변형도 내부적으로 재시도되지 않으며,
/// 발생한 흐름은 그 자리에서 종료됩니다.
///
/// ## 에러 카테고리
///
/// ### 1. 사용자 계정
/// - `UserNotFound`, `DuplicateEmail`, `InvalidPassword`, `InactiveUser`
///
/// ### 2. 토큰
/// - `InvalidToken`: 검증 실패 또는 기대한 종류(access/refresh)와 다른 토큰
/// - `MalformedToken`: 유효하지 않은 토큰에서 클레임을 추출하려고 한 경우
///
/// ### 3. 이메일 인증
/// - `ExpiredCode`, `InvalidCode`, `EmailNotVerified`, `TooManyRequests`, `DeliveryFailed`
///
/// ### 4. OAuth
/// - `UnsupportedProvider`
///
/// ### 5. 인프라
/// - `DatabaseError`, `StoreError`, `ExternalServiceError`, `InternalError`
#[derive(Error, Debug)]
pub enum AppError {
    /// 이메일 또는 ID로 사용자를 찾을 수 없음
    #[error("사용자를 찾을 수 없습니다")]
    UserNotFound,

    /// 이미 가입된 이메일
    #[error("이미 사용 중인 이메일입니다")]
    DuplicateEmail,

    /// 비밀번호 불일치
    #[error("비밀번호가 일치하지 않습니다")]
    InvalidPassword,

    /// 비활성화되었거나 탈퇴한 계정
    #[error("비활성화된 계정입니다")]
    InactiveUser,

    /// 서명/만료/종류 검증에 실패한 토큰
    ///
    /// 서명 불일치와 만료를 구분하지 않습니다. 검증 내부 정보를
    /// 클라이언트에 노출하지 않기 위해 하나의 변형으로 합쳐집니다.
    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,

    /// 검증되지 않은 토큰에서 클레임을 읽으려고 한 경우
    #[error("토큰 형식이 올바르지 않습니다")]
    MalformedToken,

    /// 일반 인증 실패 (OAuth state 불일치, 인증 헤더 누락 등)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 인증 코드가 없거나 만료됨
    #[error("인증코드가 만료되었거나 존재하지 않습니다")]
    ExpiredCode,

    /// 인증 코드 불일치
    #[error("인증코드가 일치하지 않습니다")]
    InvalidCode,

    /// 이메일 인증을 완료하지 않은 상태로 회원가입 시도
    #[error("이메일 인증이 완료되지 않았습니다")]
    EmailNotVerified,

    /// 재발송 쿨다운 중
    #[error("잠시 후 다시 시도해주세요")]
    TooManyRequests,

    /// 메일 발송 실패
    ///
    /// 내부 값은 로그에만 남고 응답에는 일반 메시지만 노출됩니다.
    #[error("Mail delivery failed: {0}")]
    DeliveryFailed(String),

    /// 지원하지 않는 OAuth 프로바이더 키
    #[error("지원하지 않는 로그인 방식입니다: {0}")]
    UnsupportedProvider(String),

    /// 입력값 검증 에러
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// MongoDB 연산 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// TTL 키-값 저장소(Redis 등) 연산 실패
    #[error("Store error: {0}")]
    StoreError(String),

    /// 외부 API(OAuth 프로바이더 등) 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트가 분기에 사용하는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UserNotFound => "U001",
            AppError::DuplicateEmail => "U002",
            AppError::InvalidPassword => "U003",
            AppError::InactiveUser => "U004",
            AppError::InvalidToken => "A001",
            AppError::MalformedToken => "A002",
            AppError::AuthenticationError(_) => "A003",
            AppError::ExpiredCode => "E001",
            AppError::InvalidCode => "E002",
            AppError::EmailNotVerified => "E003",
            AppError::TooManyRequests => "E004",
            AppError::DeliveryFailed(_) => "E005",
            AppError::UnsupportedProvider(_) => "O001",
            AppError::ValidationError(_) => "C001",
            AppError::DatabaseError(_)
            | AppError::StoreError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "C002",
        }
    }

    /// 응답 본문에 노출할 메시지
    ///
    /// 5xx 에러는 내부 정보를 숨기고 고정 문구를 돌려줍니다.
    fn public_message(&self) -> String {
        match self {
            AppError::DeliveryFailed(_) => "메일 발송에 실패했습니다".to_string(),
            AppError::DatabaseError(_)
            | AppError::StoreError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "서버 내부 오류가 발생했습니다".to_string(),
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidPassword
            | AppError::InvalidToken
            | AppError::MalformedToken
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::InactiveUser | AppError::EmailNotVerified => StatusCode::FORBIDDEN,
            AppError::ExpiredCode
            | AppError::InvalidCode
            | AppError::UnsupportedProvider(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::DeliveryFailed(_)
            | AppError::DatabaseError(_)
            | AppError::StoreError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 원본 내용을 서버 로그에만 기록합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("[{}] {}", self.code(), self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.public_message(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let json = serde_json::to_string(&payload).context("세션 직렬화 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
