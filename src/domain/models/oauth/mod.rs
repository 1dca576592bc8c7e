//! # OAuth Domain Models
//!
//! 프로바이더마다 다른 사용자 정보 응답을 하나의 형태로 정규화한 결과입니다.
//!
//! ```text
//! Google  { sub, email, name, picture }                          ─┐
//!                                                                 ├─▶ CanonicalIdentity
//! Kakao   { id, kakao_account{email, birthyear, birthday, ...},  ─┘
//!           properties{nickname, profile_image} }
//! ```
//!
//! 정규화된 신원은 저장되지 않고, 사용자 엔티티를 만들거나 갱신하는 데에만 쓰입니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::Gender;

/// 프로바이더에 무관한 소셜 로그인 신원
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIdentity {
    /// 프로바이더 측 사용자 식별자
    pub provider_id: String,
    pub provider: AuthProvider,
    /// 사용자가 이메일 제공에 동의하지 않으면 `None`
    pub email: Option<String>,
    pub name: Option<String>,
    pub profile_image_url: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

impl CanonicalIdentity {
    /// 표시 이름. 이름이 없으면 이메일의 로컬 파트를 사용합니다.
    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| {
            self.email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: Option<&str>, email: Option<&str>) -> CanonicalIdentity {
        CanonicalIdentity {
            provider_id: "1".to_string(),
            provider: AuthProvider::Google,
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            profile_image_url: None,
            birth_date: None,
            gender: None,
        }
    }

    #[test]
    fn test_display_name_prefers_name() {
        assert_eq!(
            identity(Some("홍길동"), Some("hong@x.com")).display_name().as_deref(),
            Some("홍길동")
        );
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        assert_eq!(
            identity(None, Some("hong@x.com")).display_name().as_deref(),
            Some("hong")
        );
        assert_eq!(identity(None, None).display_name(), None);
    }
}
