//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수(`.env` 파일 포함)를 시작 시 한 번 읽어 불변 [`AppConfig`]를 만들고,
//! 이후에는 이 값이 각 서비스 생성자에 명시적으로 전달됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 메일 설정
//! - [`auth_config`] - JWT, OAuth 프로바이더 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use sparring_auth::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # JWT 설정 (프로덕션 필수)
//! export JWT_SECRET="at-least-32-bytes-of-random-secret-material"
//!
//! # 저장소
//! export STORE_BACKEND="redis"     # redis | memory
//! export REDIS_URL="redis://localhost:6379"
//! export MONGODB_URI="mongodb://localhost:27017"
//!
//! # 메일
//! export MAIL_API_URL="https://mail.example.com/v1/send"
//! export MAIL_API_KEY="..."
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::core::errors::AppResult;

/// 애플리케이션 전체 설정
///
/// 시작 시 한 번 만들어지고 이후에는 읽기만 합니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub password: PasswordConfig,
    pub jwt: JwtConfig,
    pub oauth: OAuthConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - JWT 설정이 유효하지 않은 경우
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&process_env)
    }

    /// 임의의 조회 함수로 설정을 만듭니다.
    pub fn from_lookup(lookup: EnvLookup<'_>) -> AppResult<Self> {
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            server: ServerConfig::from_lookup(lookup),
            storage: StorageConfig::from_lookup(lookup),
            password: PasswordConfig::from_lookup(lookup, &environment),
            jwt: JwtConfig::from_lookup(lookup, &environment)?,
            oauth: OAuthConfig::from_lookup(lookup),
            mail: MailConfig::from_lookup(lookup),
            environment,
        })
    }
}
