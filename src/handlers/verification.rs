//! Email Verification HTTP Handlers
//!
//! 회원가입 전 이메일 인증코드 발송, 재발송, 검증 엔드포인트입니다.
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | POST | `/api/auth/send-verification` | 인증코드 발송 |
//! | POST | `/api/auth/resend-verification` | 인증코드 재발송 (60초 쿨다운) |
//! | POST | `/api/auth/verify-code` | 인증코드 확인 |

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::auth::{EmailRequest, MessageResponse, VerifyCodeRequest};
use crate::services::email::VerificationService;

#[post("/send-verification")]
pub async fn send_verification(
    verification: web::Data<VerificationService>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    verification.issue_code(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::of(
        payload.into_inner().email,
        "인증코드가 발송되었습니다.",
    )))
}

#[post("/resend-verification")]
pub async fn resend_verification(
    verification: web::Data<VerificationService>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    verification.resend_code(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::of(
        payload.into_inner().email,
        "인증코드가 재발송되었습니다.",
    )))
}

#[post("/verify-code")]
pub async fn verify_code(
    verification: web::Data<VerificationService>,
    payload: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    verification.verify(&payload.email, &payload.code).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::of(
        payload.into_inner().email,
        "이메일 인증이 완료되었습니다.",
    )))
}
