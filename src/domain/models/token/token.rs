//! JWT 클레임 구조체와 토큰 종류
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`, `jti`)에 토큰 종류(`typ`)와
//! 액세스 토큰 전용 `email` 클레임을 더한 형태입니다.
use serde::{Deserialize, Serialize};

/// 토큰 종류
///
/// 액세스 토큰을 리프레시 자리에 (또는 그 반대로) 재사용하지 못하게 하는 구분값입니다.
/// 토큰을 받는 쪽은 항상 기대하는 종류를 직접 확인해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 사용자 ID (문자열로 인코딩된 정수)
/// - `typ`: 토큰 종류 (`access` / `refresh`)
/// - `email`: 사용자 이메일 (액세스 토큰만)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `jti`: 토큰 고유 ID (같은 초에 발급된 토큰도 서로 다르게)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// 액세스 + 리프레시 토큰 쌍
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
