//! JWT 토큰 코덱 구현
//!
//! HMAC-SHA256으로 서명된 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 토큰은 자기 완결적이어서 서명/만료 검증에 저장소 조회가 필요 없습니다.
//!
//! 검증 실패의 세부 원인(서명 불일치, 형식 오류, 만료)은 이 경계에서
//! `bool`로 감춰지며, 기대하는 토큰 종류를 아는 호출자가 `InvalidToken`으로 올립니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::token::token::{TokenClaims, TokenKind, TokenPair};

const BEARER_PREFIX: &str = "Bearer ";

/// JWT 토큰 코덱
///
/// 서명 키는 생성 시 한 번 받아 고정되며 런타임에 교체되지 않습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(config.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_secs),
        }
    }

    /// 액세스 토큰 발급
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰 주체 (사용자 ID)
    /// * `email` - 액세스 토큰에만 포함되는 이메일 클레임
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let access_token = token_service.issue_access(1, "u@x.com")?;
    /// assert!(token_service.validate(&access_token));
    /// ```
    pub fn issue_access(&self, user_id: i64, email: &str) -> AppResult<String> {
        self.issue(user_id, TokenKind::Access, Some(email.to_string()), self.access_ttl)
    }

    /// 리프레시 토큰 발급 (이메일 클레임 없음)
    pub fn issue_refresh(&self, user_id: i64) -> AppResult<String> {
        self.issue(user_id, TokenKind::Refresh, None, self.refresh_ttl)
    }

    /// 액세스 + 리프레시 토큰 쌍 발급
    pub fn issue_pair(&self, user_id: i64, email: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id, email)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    fn issue(
        &self,
        user_id: i64,
        kind: TokenKind,
        email: Option<String>,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            kind,
            email,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 이 코덱이 발급했고, 변조되지 않았고, 만료되지 않은 토큰인지 확인합니다.
    ///
    /// 어떤 입력에도 에러를 내지 않고 `false`를 반환합니다.
    pub fn validate(&self, token: &str) -> bool {
        self.claims(token).is_ok()
    }

    /// 토큰 주체(사용자 ID)
    ///
    /// # Errors
    ///
    /// * `AppError::MalformedToken` - 검증되지 않는 토큰
    pub fn subject_of(&self, token: &str) -> AppResult<i64> {
        self.claims(token)?
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::MalformedToken)
    }

    /// 토큰 종류
    ///
    /// # Errors
    ///
    /// * `AppError::MalformedToken` - 검증되지 않는 토큰
    pub fn kind_of(&self, token: &str) -> AppResult<TokenKind> {
        Ok(self.claims(token)?.kind)
    }

    /// 검증된 클레임 전체
    ///
    /// # Errors
    ///
    /// * `AppError::MalformedToken` - 서명 불일치, 형식 오류, 만료
    pub fn claims(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::MalformedToken
            })
    }

    /// Authorization 헤더 값에서 `Bearer ` 접두사를 제거합니다.
    ///
    /// 접두사가 없으면 값을 그대로 돌려줍니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// assert_eq!(TokenService::strip_bearer("Bearer abc"), "abc");
    /// assert_eq!(TokenService::strip_bearer("abc"), "abc");
    /// ```
    pub fn strip_bearer(header_value: &str) -> &str {
        header_value
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(header_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-bytes";

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new(SECRET, 3600, 1_209_600).unwrap())
    }

    #[test]
    fn test_access_token_round_trip() {
        let codec = service();
        let token = codec.issue_access(42, "u@x.com").unwrap();

        assert!(codec.validate(&token));
        assert_eq!(codec.subject_of(&token).unwrap(), 42);
        assert_eq!(codec.kind_of(&token).unwrap(), TokenKind::Access);
        assert_eq!(codec.claims(&token).unwrap().email.as_deref(), Some("u@x.com"));
    }

    #[test]
    fn test_refresh_token_has_no_email_claim() {
        let codec = service();
        let token = codec.issue_refresh(7).unwrap();

        assert_eq!(codec.subject_of(&token).unwrap(), 7);
        assert_eq!(codec.kind_of(&token).unwrap(), TokenKind::Refresh);
        assert_eq!(codec.claims(&token).unwrap().email, None);
    }

    #[test]
    fn test_tokens_issued_together_are_distinct() {
        let codec = service();
        let pair = codec.issue_pair(1, "u@x.com").unwrap();
        let again = codec.issue_refresh(1).unwrap();

        assert!(!pair.access_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_ne!(pair.refresh_token, again);
    }

    #[test]
    fn test_rejects_token_from_other_key() {
        let other = TokenService::new(
            &JwtConfig::new("another-secret-key-that-is-32-bytes-long", 3600, 7200).unwrap(),
        );
        let token = other.issue_access(1, "u@x.com").unwrap();

        assert!(!service().validate(&token));
        assert!(matches!(service().subject_of(&token), Err(AppError::MalformedToken)));
    }

    #[test]
    fn test_rejects_expired_token() {
        let codec = service();
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "1".to_string(),
            kind: TokenKind::Access,
            email: None,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::seconds(1)).timestamp(),
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(!codec.validate(&token));
    }

    #[test]
    fn test_any_single_character_mutation_fails_validation() {
        let codec = service();
        let token = codec.issue_access(1, "u@x.com").unwrap();

        for (index, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut mutated = token.clone();
            mutated.replace_range(index..index + 1, &replacement.to_string());

            assert!(
                !codec.validate(&mutated),
                "mutation at index {} was accepted",
                index
            );
        }
    }

    #[test]
    fn test_garbage_input_fails_closed() {
        let codec = service();

        assert!(!codec.validate(""));
        assert!(!codec.validate("not.a.jwt"));
        assert!(matches!(codec.kind_of("garbage"), Err(AppError::MalformedToken)));
    }

    #[test]
    fn test_strip_bearer_is_tolerant() {
        assert_eq!(TokenService::strip_bearer("Bearer abc.def"), "abc.def");
        assert_eq!(TokenService::strip_bearer("abc.def"), "abc.def");
        assert_eq!(TokenService::strip_bearer("bearer abc"), "bearer abc");
    }
}
