//! # 인증 미들웨어
//!
//! Authorization 헤더의 액세스 토큰을 [`AuthService::resolve_identity`]로 해석하고,
//! 결과를 해당 요청의 extensions에 [`AuthenticatedUser`]로 넣습니다.
//! 핸들러는 추출자로 사용자 정보를 받습니다.
//!
//! ## 모드
//!
//! | 모드 | 토큰 없음/무효 | 토큰 유효 |
//! |------|----------------|-----------|
//! | `Required` | 에러 응답 (401/403/404) | 사용자 주입 후 진행 |
//! | `Optional` | 사용자 없이 진행 | 사용자 주입 후 진행 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/auth/me")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::auth::me)
//! );
//!
//! #[get("")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> { ... }
//! ```
//!
//! [`AuthService::resolve_identity`]: crate::services::auth::AuthService::resolve_identity
//! [`AuthenticatedUser`]: crate::domain::models::auth::authenticated_user::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::auth_mode::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어 팩토리
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 유효한 액세스 토큰이 있어야 통과
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 해석하고, 없거나 무효여도 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, web, App, HttpResponse};
    use serde_json::{json, Value};

    use crate::domain::dto::auth::SignupRequest;
    use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
    use crate::test_support::test_context;

    #[get("/required")]
    async fn required_probe(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(json!({ "userId": user.user_id, "email": user.email }))
    }

    #[get("/optional")]
    async fn optional_probe(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().json(json!({ "userId": user.0.map(|u| u.user_id) }))
    }

    async fn signed_up_access_token(context: &crate::core::context::AppContext) -> String {
        let code = context.verification.issue_code("u@x.com").await.unwrap();
        context.verification.verify("u@x.com", &code).await.unwrap();
        context
            .auth
            .signup(SignupRequest {
                email: "u@x.com".to_string(),
                password: "pw123456".to_string(),
                username: "Name".to_string(),
            })
            .await
            .unwrap()
            .access_token
    }

    #[actix_web::test]
    async fn test_required_mode() {
        let (context, _) = test_context();
        let access_token = signed_up_access_token(&context).await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| context.register(cfg))
                .service(web::scope("").wrap(AuthMiddleware::required()).service(required_probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/required")
            .insert_header(("Authorization", format!("Bearer {}", access_token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["userId"], 1);
        assert_eq!(body["email"], "u@x.com");

        let req = test::TestRequest::get().uri("/required").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "A001");

        let req = test::TestRequest::get()
            .uri("/required")
            .insert_header(("Authorization", "Bearer tampered"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_optional_mode() {
        let (context, _) = test_context();
        let access_token = signed_up_access_token(&context).await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| context.register(cfg))
                .service(web::scope("").wrap(AuthMiddleware::optional()).service(optional_probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/optional")
            .insert_header(("Authorization", access_token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["userId"], 1);

        let req = test::TestRequest::get()
            .uri("/optional")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["userId"], Value::Null);
    }
}
