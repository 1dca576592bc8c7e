//! # OAuth 2.0 Authorization Code 클라이언트
//!
//! 프로바이더 동의 화면 URL을 만들고, 콜백으로 받은 인가 코드를
//! 프로바이더 사용자 정보로 바꾼 뒤 [`oauth_normalizer`]로 정규화합니다.
//!
//! ```text
//! Client            Server (OAuthClient)               Provider
//!   │ authorize        │                                   │
//!   │────────────────▶│ state 생성 → oauth:state:{state}  │
//!   │◀── url, state ──│                                   │
//!   │──────────────── 사용자 동의 ──────────────────────▶│
//!   │ callback(code, state)                                │
//!   │────────────────▶│ state 소비 (1회용)                │
//!   │                  │── POST token_uri (code) ────────▶│
//!   │                  │◀─ access_token ──────────────────│
//!   │                  │── GET user_info_uri (Bearer) ───▶│
//!   │                  │◀─ 사용자 속성 JSON ──────────────│
//!   │                  │ normalize → CanonicalIdentity     │
//! ```
//!
//! ## CSRF 방지
//!
//! state는 UUID v4이며 TTL 저장소에 프로바이더 키와 함께 저장됩니다.
//! 콜백에서 읽기와 삭제가 한 번에 일어나므로(`TtlStore::take`) 재사용할 수 없고,
//! 같은 state로 동시에 들어온 콜백 중 하나만 통과합니다.
//!
//! [`oauth_normalizer`]: crate::services::auth::oauth_normalizer

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::caching::TtlStore;
use crate::config::{AuthProvider, OAuthConfig, OAuthProviderConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::auth::OAuthAuthorizeResponse;
use crate::domain::models::oauth::CanonicalIdentity;
use crate::services::auth::oauth_normalizer;
use crate::utils::http_client::{build_http_client, DEFAULT_HTTP_TIMEOUT};

pub const OAUTH_STATE_KEY_PREFIX: &str = "oauth:state:";

/// 토큰 엔드포인트 응답 중 필요한 부분
#[derive(Debug, Deserialize)]
struct ProviderTokenResponse {
    access_token: String,
}

/// OAuth 2.0 Authorization Code 클라이언트
pub struct OAuthClient {
    config: OAuthConfig,
    store: Arc<dyn TtlStore>,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig, store: Arc<dyn TtlStore>) -> AppResult<Self> {
        Self::with_timeout(config, store, DEFAULT_HTTP_TIMEOUT)
    }

    /// 프로바이더 호출 타임아웃을 지정해 생성합니다.
    pub fn with_timeout(
        config: OAuthConfig,
        store: Arc<dyn TtlStore>,
        timeout: Duration,
    ) -> AppResult<Self> {
        Ok(Self {
            config,
            store,
            http: build_http_client(timeout)?,
        })
    }

    fn provider_config(&self, provider: AuthProvider) -> AppResult<&OAuthProviderConfig> {
        self.config
            .provider(provider)
            .ok_or_else(|| AppError::UnsupportedProvider(provider.to_string()))
    }

    /// 프로바이더 동의 화면 URL 생성
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedProvider` - 클라이언트 정보가 등록되지 않은 프로바이더
    /// * `AppError::StoreError` - state 저장 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let OAuthAuthorizeResponse { authorization_url, state } =
    ///     oauth_client.authorization_url(AuthProvider::Kakao).await?;
    /// // https://kauth.kakao.com/oauth/authorize?client_id=...&state=...
    /// ```
    pub async fn authorization_url(
        &self,
        provider: AuthProvider,
    ) -> AppResult<OAuthAuthorizeResponse> {
        let provider_config = self.provider_config(provider)?;
        let state = Uuid::new_v4().to_string();

        self.store
            .set(
                &format!("{}{}", OAUTH_STATE_KEY_PREFIX, state),
                provider.as_str(),
                self.config.state_ttl(),
            )
            .await?;

        let params = [
            ("client_id", provider_config.client_id.as_str()),
            ("redirect_uri", provider_config.redirect_uri.as_str()),
            ("scope", provider_config.scope.as_str()),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(OAuthAuthorizeResponse {
            authorization_url: format!("{}?{}", provider_config.auth_uri, query_string),
            state,
        })
    }

    /// 인가 코드로 프로바이더 사용자 신원 조회
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedProvider` - 등록되지 않은 프로바이더
    /// * `AppError::AuthenticationError` - 알 수 없거나, 다른 프로바이더의 것이거나, 이미 사용된 state
    /// * `AppError::ExternalServiceError` - 프로바이더 통신/응답 오류
    /// * `AppError::ValidationError` - 사용자 식별자가 없는 응답
    pub async fn fetch_identity(
        &self,
        provider: AuthProvider,
        code: &str,
        state: &str,
    ) -> AppResult<CanonicalIdentity> {
        let provider_config = self.provider_config(provider)?;
        self.consume_state(provider, state).await?;

        let token = self.exchange_code(provider, provider_config, code).await?;
        let attributes = self
            .fetch_user_attributes(provider, provider_config, &token.access_token)
            .await?;

        oauth_normalizer::extract(provider, &attributes)
    }

    async fn consume_state(&self, provider: AuthProvider, state: &str) -> AppResult<()> {
        let key = format!("{}{}", OAUTH_STATE_KEY_PREFIX, state);
        let stored = self.store.take(&key).await?;

        match stored {
            Some(stored_provider) if stored_provider == provider.as_str() => Ok(()),
            Some(_) => {
                log::warn!("OAuth state 프로바이더 불일치: {}", provider);
                Err(AppError::AuthenticationError(
                    "OAuth state가 일치하지 않습니다".to_string(),
                ))
            }
            None => {
                log::warn!("알 수 없거나 만료된 OAuth state: {}", provider);
                Err(AppError::AuthenticationError(
                    "유효하지 않거나 만료된 OAuth state입니다".to_string(),
                ))
            }
        }
    }

    async fn exchange_code(
        &self,
        provider: AuthProvider,
        provider_config: &OAuthProviderConfig,
        code: &str,
    ) -> AppResult<ProviderTokenResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", provider_config.client_id.as_str()),
            ("client_secret", provider_config.client_secret.as_str()),
            ("redirect_uri", provider_config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&provider_config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", provider, e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}",
                provider, error_text
            )));
        }

        response
            .json::<ProviderTokenResponse>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", provider, e))
            })
    }

    async fn fetch_user_attributes(
        &self,
        provider: AuthProvider,
        provider_config: &OAuthProviderConfig,
        access_token: &str,
    ) -> AppResult<Map<String, Value>> {
        let response = self
            .http
            .get(&provider_config.user_info_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", provider, e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: {}",
                provider, error_text
            )));
        }

        response
            .json::<Map<String, Value>>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", provider, e))
            })
    }
}
