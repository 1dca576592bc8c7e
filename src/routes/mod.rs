//! 라우트 구성
//!
//! ```text
//! GET  /health
//! /api/auth/me        (AuthMiddleware::required)
//! /api/auth/...       인증/이메일 인증/소셜 로그인
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    // `/api/auth` 스코프보다 먼저 등록해야 매칭됩니다
    cfg.service(
        web::scope("/api/auth/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::auth::me),
    );

    cfg.service(
        web::scope("/api/auth")
            .service(handlers::verification::send_verification)
            .service(handlers::verification::resend_verification)
            .service(handlers::verification::verify_code)
            .service(handlers::auth::signup)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::oauth::authorize)
            .service(handlers::oauth::callback),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "sparring_auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
