//! OAuth 2.0 HTTP Handlers
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | GET | `/api/auth/oauth2/{provider}/authorize` | 동의 화면 URL + state |
//! | GET | `/api/auth/oauth2/{provider}/callback?code&state` | 소셜 로그인 완료, 토큰 발급 |
//!
//! `{provider}`는 `google`, `kakao` (대소문자 무관)입니다.

use actix_web::{get, web, HttpResponse};

use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::dto::auth::OAuthCallbackQuery;
use crate::services::auth::{AuthService, OAuthClient};

#[get("/oauth2/{provider}/authorize")]
pub async fn authorize(
    oauth_client: web::Data<OAuthClient>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = AuthProvider::from_key(&path)?;

    let response = oauth_client.authorization_url(provider).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/oauth2/{provider}/callback")]
pub async fn callback(
    oauth_client: web::Data<OAuthClient>,
    auth_service: web::Data<AuthService>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = AuthProvider::from_key(&path)?;

    // 사용자가 동의를 거부했거나 프로바이더 에러
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("{} OAuth 에러: {} - {}", provider, error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    let query = query.into_inner();
    let (code, state) = match (query.code, query.state) {
        (Some(code), Some(state)) => (code, state),
        _ => {
            return Err(AppError::ValidationError(
                "code와 state는 필수입니다".to_string(),
            ));
        }
    };

    let identity = oauth_client.fetch_identity(provider, &code, &state).await?;
    let response = auth_service.complete_oauth_login(identity).await?;

    Ok(HttpResponse::Ok().json(response))
}
