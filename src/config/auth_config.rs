//! # Authentication Configuration Module
//!
//! JWT 서명 키/토큰 수명, OAuth 프로바이더(Google, Kakao) 클라이언트 정보,
//! 지원 프로바이더 열거형을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="at-least-32-bytes-of-random-secret-material"
//! export JWT_ACCESS_TOKEN_VALIDITY_SECS="3600"
//! export JWT_REFRESH_TOKEN_VALIDITY_SECS="1209600"
//! ```
//!
//! ### OAuth 프로바이더 설정 (선택)
//! ```bash
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/auth/oauth2/google/callback"
//!
//! export KAKAO_CLIENT_ID="..."
//! export KAKAO_CLIENT_SECRET="..."
//! export KAKAO_REDIRECT_URI="http://localhost:8080/api/auth/oauth2/kakao/callback"
//! ```
//!
//! `*_CLIENT_ID`가 없는 프로바이더는 비활성화되며, 해당 프로바이더로의
//! 로그인 요청은 `UnsupportedProvider`로 거절됩니다.

use crate::config::data_config::{lookup_or, lookup_parsed, EnvLookup, Environment};
use crate::core::errors::AppError;

/// JWT 서명 키 최소 길이 (HS256, 256비트)
pub const MIN_JWT_SECRET_BYTES: usize = 32;

const DEV_JWT_SECRET: &str = "sparring-development-only-secret-key-change-me";

/// JSON Web Token (JWT) 관련 설정
///
/// 시작 시 한 번 만들어져 [`TokenService`](crate::services::auth::TokenService)에
/// 생성자 인자로 전달됩니다. 런타임에 키를 교체하지 않습니다.
///
/// ## 권장 설정값
///
/// - 액세스 토큰: 1시간
/// - 리프레시 토큰: 14일
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC 서명 키
    pub secret: String,
    /// 액세스 토큰 수명 (초)
    pub access_token_ttl_secs: i64,
    /// 리프레시 토큰 수명 (초)
    pub refresh_token_ttl_secs: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .finish()
    }
}

impl JwtConfig {
    /// 서명 키와 수명으로 설정을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 키가 32바이트 미만이거나 수명이 0 이하인 경우
    pub fn new(
        secret: impl Into<String>,
        access_token_ttl_secs: i64,
        refresh_token_ttl_secs: i64,
    ) -> Result<Self, AppError> {
        let secret = secret.into();

        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET은 최소 {}바이트 이상이어야 합니다",
                MIN_JWT_SECRET_BYTES
            )));
        }

        if access_token_ttl_secs <= 0 || refresh_token_ttl_secs <= 0 {
            return Err(AppError::InternalError(
                "토큰 수명은 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(Self {
            secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
        })
    }

    /// 환경 변수에서 JWT 설정을 읽습니다.
    ///
    /// 개발/테스트 환경에서는 `JWT_SECRET`이 없으면 경고 후 개발용 키를 사용하고,
    /// 그 외 환경에서는 시작을 거부합니다.
    pub fn from_lookup(lookup: EnvLookup<'_>, environment: &Environment) -> Result<Self, AppError> {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment.allows_insecure_defaults() => {
                log::warn!("JWT_SECRET not set, using development key (not secure for production!)");
                DEV_JWT_SECRET.to_string()
            }
            None => {
                return Err(AppError::InternalError(
                    "JWT_SECRET must be set".to_string(),
                ));
            }
        };

        Self::new(
            secret,
            lookup_parsed(lookup, "JWT_ACCESS_TOKEN_VALIDITY_SECS", 3_600),
            lookup_parsed(lookup, "JWT_REFRESH_TOKEN_VALIDITY_SECS", 1_209_600),
        )
    }
}

/// 지원하는 OAuth 인증 공급자
///
/// 로컬(이메일/비밀번호) 계정은 `Option<AuthProvider>::None`으로 표현합니다.
/// 새 프로바이더는 변형을 추가하고 정규화 함수 하나를 등록하면 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthProvider {
    /// Google OAuth 2.0 (OpenID Connect)
    Google,
    /// Kakao 로그인
    Kakao,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 프로바이더 키 (대소문자 무관, 예: `"google"`, `"KAKAO"`)
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedProvider` - 알 수 없는 키
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let provider = AuthProvider::from_key("Google")?;
    /// assert_eq!(provider, AuthProvider::Google);
    /// ```
    pub fn from_key(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "kakao" => Ok(AuthProvider::Kakao),
            _ => Err(AppError::UnsupportedProvider(s.to_string())),
        }
    }

    /// 소문자 프로바이더 키
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Kakao => "kakao",
        }
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 OAuth 프로바이더의 클라이언트 등록 정보
#[derive(Clone)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// 사용자 동의 화면 URL
    pub auth_uri: String,
    /// 인가 코드 → 액세스 토큰 교환 URL
    pub token_uri: String,
    /// 사용자 정보 조회 URL
    pub user_info_uri: String,
    /// 공백 구분 scope 목록
    pub scope: String,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_uri", &self.auth_uri)
            .finish_non_exhaustive()
    }
}

impl OAuthProviderConfig {
    /// `{PREFIX}_CLIENT_ID`가 있을 때만 설정을 만듭니다.
    fn from_lookup(lookup: EnvLookup<'_>, provider: AuthProvider) -> Option<Self> {
        let prefix = provider.as_str().to_uppercase();
        let key = |suffix: &str| format!("{}_{}", prefix, suffix);

        let client_id = lookup(&key("CLIENT_ID")).filter(|v| !v.trim().is_empty())?;
        let (auth_uri, token_uri, user_info_uri, scope) = Self::defaults(provider);

        Some(Self {
            client_id,
            client_secret: lookup_or(lookup, &key("CLIENT_SECRET"), ""),
            redirect_uri: lookup_or(
                lookup,
                &key("REDIRECT_URI"),
                &format!("http://localhost:8080/api/auth/oauth2/{}/callback", provider.as_str()),
            ),
            auth_uri: lookup_or(lookup, &key("AUTH_URI"), auth_uri),
            token_uri: lookup_or(lookup, &key("TOKEN_URI"), token_uri),
            user_info_uri: lookup_or(lookup, &key("USER_INFO_URI"), user_info_uri),
            scope: lookup_or(lookup, &key("SCOPE"), scope),
        })
    }

    fn defaults(provider: AuthProvider) -> (&'static str, &'static str, &'static str, &'static str) {
        match provider {
            AuthProvider::Google => (
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                "https://openidconnect.googleapis.com/v1/userinfo",
                "openid email profile",
            ),
            AuthProvider::Kakao => (
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
                "https://kapi.kakao.com/v2/user/me",
                "profile_nickname profile_image account_email birthday birthyear gender",
            ),
        }
    }
}

/// OAuth 공통 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub google: Option<OAuthProviderConfig>,
    pub kakao: Option<OAuthProviderConfig>,
    /// 인증 시작 후 콜백까지 허용하는 시간 (분)
    pub state_timeout_minutes: i64,
}

impl OAuthConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        Self {
            google: OAuthProviderConfig::from_lookup(lookup, AuthProvider::Google),
            kakao: OAuthProviderConfig::from_lookup(lookup, AuthProvider::Kakao),
            state_timeout_minutes: lookup_parsed(lookup, "OAUTH_STATE_TIMEOUT_MINUTES", 10),
        }
    }

    /// 프로바이더 설정 조회. 등록되지 않은 프로바이더는 `None`.
    pub fn provider(&self, provider: AuthProvider) -> Option<&OAuthProviderConfig> {
        match provider {
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::Kakao => self.kakao.as_ref(),
        }
    }

    /// state TTL
    pub fn state_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.state_timeout_minutes.max(1) as u64 * 60)
    }
}
