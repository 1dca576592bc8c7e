//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 저장소(MongoDB/Redis), 메일 발송 설정을 관리합니다.
//! 모든 설정은 시작 시 한 번 읽혀 불변 구조체로 고정됩니다.

use std::env;

/// 환경 변수 조회 함수 타입
///
/// 테스트에서는 `HashMap` 기반 클로저를 넘겨 프로세스 환경을 건드리지 않습니다.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 프로세스 환경 변수 조회
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 값을 읽고 비어 있으면 기본값을 사용합니다.
pub(crate) fn lookup_or(lookup: EnvLookup<'_>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 숫자 값을 읽고 파싱 실패 시 경고 후 기본값을 사용합니다.
pub(crate) fn lookup_parsed<T>(lookup: EnvLookup<'_>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, raw, default);
            default
        }),
        None => default,
    }
}

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값에서 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        Self::from_str(&lookup_or(lookup, "ENVIRONMENT", "production"))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발용 기본값(예: JWT 비밀키)을 허용하는 환경인지 확인합니다.
    pub fn allows_insecure_defaults(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 4-15 범위이면 사용하고, 아니면 환경별 기본값을 사용합니다.
    pub fn from_lookup(lookup: EnvLookup<'_>, environment: &Environment) -> Self {
        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment));

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩 호스트. 기본값: "127.0.0.1"
    pub host: String,
    /// 바인딩 포트. 기본값: 8080
    pub port: u16,
    /// CORS 허용 Origin 목록 (`CORS_ALLOWED_ORIGINS`, 쉼표 구분)
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        let cors_allowed_origins = lookup_or(lookup, "CORS_ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            host: lookup_or(lookup, "HOST", "127.0.0.1"),
            port: lookup_parsed(lookup, "PORT", 8080),
            cors_allowed_origins,
        }
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 사용자 저장소와 TTL 저장소의 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB + Redis
    Redis,
    /// 프로세스 메모리 (개발/테스트용, 재시작 시 소멸)
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::Redis,
        }
    }
}

/// MongoDB / Redis 연결 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
}

impl StorageConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        Self {
            backend: StoreBackend::from_str(&lookup_or(lookup, "STORE_BACKEND", "redis")),
            mongodb_uri: lookup_or(lookup, "MONGODB_URI", "mongodb://localhost:27017"),
            database_name: lookup_or(lookup, "DATABASE_NAME", "sparring_auth"),
            redis_url: lookup_or(lookup, "REDIS_URL", "redis://localhost:6379"),
        }
    }
}

/// 메일 발송 설정
///
/// `MAIL_API_URL`이 없으면 실제 발송 대신 로그로만 남기는 발송기를 사용합니다.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP 메일 API 엔드포인트
    pub api_url: Option<String>,
    /// 메일 API 키 (Bearer)
    pub api_key: Option<String>,
    /// 발신 주소
    pub from_address: String,
    /// 메일 제목/본문에 들어가는 서비스 이름
    pub service_name: String,
}

impl MailConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        Self {
            api_url: lookup("MAIL_API_URL").filter(|v| !v.trim().is_empty()),
            api_key: lookup("MAIL_API_KEY").filter(|v| !v.trim().is_empty()),
            from_address: lookup_or(lookup, "MAIL_FROM", "no-reply@sparring.local"),
            service_name: lookup_or(lookup, "MAIL_SERVICE_NAME", "Sparring"),
        }
    }
}
