//! HTTP 핸들러
//!
//! 핸들러는 요청 DTO 검증 후 `web::Data`로 받은 서비스를 호출하고,
//! 서비스 에러는 `AppError`의 `ResponseError` 구현으로 응답이 됩니다.
//!
//! - [`auth`] - 회원가입, 로그인, 토큰 갱신/로그아웃, 현재 사용자
//! - [`verification`] - 이메일 인증코드
//! - [`oauth`] - 소셜 로그인

pub mod auth;
pub mod oauth;
pub mod verification;
