//! 인증 응답 DTO
use serde::{Deserialize, Serialize};

use crate::core::errors::AppResult;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::TokenPair;

pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// 인증 결과 (회원가입/로그인/토큰 갱신/OAuth 로그인/토큰 확인)
///
/// `refreshToken`은 토큰 확인(`/me`) 응답에서는 생략됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
}

impl AuthResponse {
    /// 사용자 요약 + 새 토큰 쌍
    pub fn issued(user: &User, tokens: TokenPair) -> AppResult<Self> {
        Ok(Self {
            user_id: user.require_id()?,
            email: user.email.clone(),
            username: user.username.clone(),
            access_token: tokens.access_token,
            refresh_token: Some(tokens.refresh_token),
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    /// 사용자 요약 + 요청에 사용된 액세스 토큰 (리프레시 토큰 없음)
    pub fn resolved(user_id: i64, email: String, username: String, access_token: String) -> Self {
        Self {
            user_id,
            email,
            username,
            access_token,
            refresh_token: None,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// 단순 메시지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub email: String,
    pub message: String,
}

impl MessageResponse {
    pub fn of(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
        }
    }
}

/// OAuth 인증 시작 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthAuthorizeResponse {
    pub authorization_url: String,
    pub state: String,
}
