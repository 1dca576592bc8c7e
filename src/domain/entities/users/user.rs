//! User Entity Implementation
//!
//! 사용자(Identity) 엔티티입니다.
//! 로컬 가입 계정과 OAuth(Google, Kakao) 계정을 하나의 모델로 표현합니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};

/// OAuth 전용 계정의 비밀번호 해시 자리에 들어가는 값
///
/// bcrypt 해시 형식이 아니므로 어떤 평문과도 일치하지 않습니다.
pub const OAUTH_PASSWORD_SENTINEL: &str = "{oauth2}";

/// 성별
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// 사용자 엔티티
///
/// `id`는 저장소가 저장 시점에 순차적으로 부여합니다(1부터).
/// `provider`가 `None`이면 이메일/비밀번호로 가입한 로컬 계정입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시 또는 [`OAUTH_PASSWORD_SENTINEL`]
    pub password_hash: String,
    /// 표시 이름(닉네임)
    pub username: String,
    /// 소셜 로그인 프로바이더
    #[serde(default)]
    pub provider: Option<AuthProvider>,
    /// 프로바이더 측 사용자 식별자
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 탈퇴(소프트 삭제) 시각
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호)
    pub fn new_local(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            email,
            password_hash,
            username,
            provider: None,
            provider_id: None,
            profile_image_url: None,
            birth_date: None,
            gender: None,
            is_active: true,
            deleted_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// 비밀번호 해시 자리에는 [`OAUTH_PASSWORD_SENTINEL`]이 들어가므로
    /// 비밀번호 로그인은 항상 실패합니다.
    pub fn new_oauth(
        email: String,
        username: String,
        provider: AuthProvider,
        provider_id: String,
    ) -> Self {
        Self {
            provider: Some(provider),
            provider_id: Some(provider_id),
            ..Self::new_local(email, username, OAUTH_PASSWORD_SENTINEL.to_string())
        }
    }

    /// 저장된 사용자의 ID
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 아직 저장되지 않은 엔티티
    pub fn require_id(&self) -> AppResult<i64> {
        self.id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
    }

    /// 로그인/토큰 사용이 가능한 계정인지 확인 (활성 상태이고 탈퇴하지 않음)
    pub fn is_usable(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }

    /// 소셜 로그인 사용자 여부
    pub fn is_social_user(&self) -> bool {
        self.provider.is_some()
    }

    /// 마지막 로그인 시간 갱신
    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// 기존 로컬 계정에 소셜 프로바이더 연결
    pub fn attach_provider(&mut self, provider: AuthProvider, provider_id: String) {
        self.provider = Some(provider);
        self.provider_id = Some(provider_id);
        self.updated_at = Utc::now();
    }

    /// 프로필 이미지 갱신. `None`이면 기존 값을 유지합니다.
    pub fn update_profile_image(&mut self, profile_image_url: Option<String>) {
        if let Some(url) = profile_image_url {
            self.profile_image_url = Some(url);
            self.updated_at = Utc::now();
        }
    }

    /// 계정 비활성화 및 소프트 삭제
    pub fn deactivate(&mut self) {
        let now = Utc::now();
        self.is_active = false;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
