//! # OAuth 사용자 정보 정규화
//!
//! 프로바이더별 사용자 정보 응답(JSON 속성 맵)을 [`CanonicalIdentity`]로 변환합니다.
//! 각 프로바이더는 순수 함수 하나로 구현되며 [`extract`]가 [`AuthProvider`]로 분기합니다.
//!
//! ## 프로바이더별 형태
//!
//! | 프로바이더 | provider_id | email | name | profile image | 생년월일 | 성별 |
//! |------------|-------------|-------|------|---------------|----------|------|
//! | Google | `sub` | `email` | `name` | `picture` | - | - |
//! | Kakao | `id` | `kakao_account.email` | `properties.nickname` | `properties.profile_image` | `kakao_account.birthyear` + `birthday` | `kakao_account.gender` |
//!
//! 빈 문자열은 값이 없는 것으로 취급합니다.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::Gender;
use crate::domain::models::oauth::CanonicalIdentity;
use crate::utils::string_utils::{object_attr, string_attr};

/// 프로바이더 응답을 정규화된 신원으로 변환
///
/// # Errors
///
/// * `AppError::ValidationError` - 프로바이더 사용자 식별자가 없는 응답
///
/// # Examples
///
/// ```rust,ignore
/// let attributes = json!({ "sub": "1234", "email": "u@gmail.com" });
/// let identity = extract(AuthProvider::Google, attributes.as_object().unwrap())?;
/// assert_eq!(identity.provider_id, "1234");
/// ```
pub fn extract(
    provider: AuthProvider,
    attributes: &Map<String, Value>,
) -> AppResult<CanonicalIdentity> {
    let identity = match provider {
        AuthProvider::Google => google(attributes),
        AuthProvider::Kakao => kakao(attributes),
    };

    identity.ok_or_else(|| {
        AppError::ValidationError(format!("{} 사용자 식별자가 없습니다", provider))
    })
}

/// Google (OpenID Connect userinfo) 평면 응답
fn google(attributes: &Map<String, Value>) -> Option<CanonicalIdentity> {
    Some(CanonicalIdentity {
        provider_id: string_attr(attributes, "sub")?,
        provider: AuthProvider::Google,
        email: string_attr(attributes, "email"),
        name: string_attr(attributes, "name"),
        profile_image_url: string_attr(attributes, "picture"),
        birth_date: None,
        gender: None,
    })
}

/// Kakao `/v2/user/me` 중첩 응답
fn kakao(attributes: &Map<String, Value>) -> Option<CanonicalIdentity> {
    let account = object_attr(attributes, "kakao_account");
    let properties = object_attr(attributes, "properties");
    let account_attr = |key: &str| account.and_then(|a| string_attr(a, key));
    let property_attr = |key: &str| properties.and_then(|p| string_attr(p, key));

    Some(CanonicalIdentity {
        provider_id: string_attr(attributes, "id")?,
        provider: AuthProvider::Kakao,
        email: account_attr("email"),
        name: property_attr("nickname"),
        profile_image_url: property_attr("profile_image"),
        birth_date: kakao_birth_date(account_attr("birthyear"), account_attr("birthday")),
        gender: account_attr("gender").map(|g| match g.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }),
    })
}

/// `birthyear`(yyyy) + `birthday`(MMDD) → 날짜
///
/// 한쪽이라도 없거나 달력상 존재하지 않는 날짜면 `None`입니다.
fn kakao_birth_date(birthyear: Option<String>, birthday: Option<String>) -> Option<NaiveDate> {
    let (year, monthday) = (birthyear?, birthday?);
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(&year, 4) || !all_digits(&monthday, 4) {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let month: u32 = monthday[..2].parse().ok()?;
    let day: u32 = monthday[2..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
