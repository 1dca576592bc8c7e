use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;

/// 요청 시점에 액세스 토큰으로부터 해석된 사용자
///
/// 인증 미들웨어가 해당 요청의 extensions에만 넣어두며,
/// 핸들러는 추출자(extractor)로 명시적으로 받아 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: i64,
    pub email: String,
    pub username: String,
    /// 소셜 로그인 프로바이더 (로컬 계정이면 `None`)
    pub provider: Option<AuthProvider>,
    /// 이 요청에 사용된 액세스 토큰 (`Bearer ` 제외)
    #[serde(skip)]
    pub access_token: String,
}

impl AuthenticatedUser {
    /// 저장된 사용자 엔티티와 요청 토큰으로 생성합니다.
    pub fn from_user(user: &User, access_token: &str) -> AppResult<Self> {
        Ok(Self {
            user_id: user.require_id()?,
            email: user.email.clone(),
            username: user.username.clone(),
            provider: user.provider,
            access_token: access_token.to_string(),
        })
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::InvalidToken)),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
