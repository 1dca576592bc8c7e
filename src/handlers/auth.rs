//! Authentication HTTP Handlers
//!
//! 이메일/비밀번호 인증과 토큰 수명주기 엔드포인트입니다.
//! 토큰은 모두 `Authorization` 헤더로 받으며 `Bearer ` 접두사는 있어도 없어도 됩니다.
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | POST | `/api/auth/signup` | 회원가입 (이메일 인증 필요) |
//! | POST | `/api/auth/login` | 로그인 |
//! | POST | `/api/auth/refresh` | 리프레시 토큰으로 토큰 쌍 재발급 |
//! | POST | `/api/auth/logout` | 리프레시 세션 삭제 |
//! | GET | `/api/auth/me` | 액세스 토큰 확인 (인증 필요) |

use actix_web::http::header::AUTHORIZATION;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::auth::AuthService;

/// Authorization 헤더 값. 없으면 `InvalidToken`.
fn authorization_header(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)
}

#[post("/signup")]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth_service.signup(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/refresh")]
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let refresh_token = authorization_header(&req)?;

    let response = auth_service.refresh(refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/logout")]
pub async fn logout(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let access_token = authorization_header(&req)?;

    auth_service.logout(access_token).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 현재 사용자 확인
///
/// 인증 미들웨어가 해석한 사용자와 요청에 쓰인 액세스 토큰을 돌려줍니다.
/// 리프레시 토큰은 포함하지 않습니다.
#[get("")]
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(AuthResponse::resolved(
        user.user_id,
        user.email,
        user.username,
        user.access_token,
    )))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::routes::configure_all_routes;
    use crate::test_support::test_context;

    #[actix_web::test]
    async fn test_full_local_lifecycle() {
        let (context, mail) = test_context();
        let app = test::init_service(
            App::new()
                .configure(|cfg| context.register(cfg))
                .configure(configure_all_routes),
        )
        .await;

        // 인증 전 가입 불가
        let signup_body = json!({ "email": "u@x.com", "password": "pw123456", "username": "Name" });
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(&signup_body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        // 이메일 인증
        let req = test::TestRequest::post()
            .uri("/api/auth/send-verification")
            .set_json(json!({ "email": "u@x.com" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
        let req = test::TestRequest::post()
            .uri("/api/auth/verify-code")
            .set_json(json!({ "email": "u@x.com", "code": mail.last_code().unwrap() }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        // 가입
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(&signup_body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let signup: Value = test::read_body_json(resp).await;
        assert_eq!(signup["userId"], 1);
        assert_eq!(signup["tokenType"], "Bearer");
        let access = signup["accessToken"].as_str().unwrap().to_string();
        let refresh = signup["refreshToken"].as_str().unwrap().to_string();
        assert_ne!(access, refresh);

        // 토큰 확인
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["userId"], 1);
        assert_eq!(me["accessToken"], access.as_str());
        assert!(me.get("refreshToken").is_none());

        // 갱신
        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_request();
        let refreshed: Value = test::call_and_read_body_json(&app, req).await;
        let new_refresh = refreshed["refreshToken"].as_str().unwrap().to_string();
        assert_ne!(new_refresh, refresh);

        // 이전 리프레시 토큰 재사용 불가
        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // 로그아웃 후 새 리프레시 토큰도 무효
        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 204);
        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .insert_header(("Authorization", new_refresh))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "A001");
    }

    #[actix_web::test]
    async fn test_login_errors_map_to_codes() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new()
                .configure(|cfg| context.register(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "nobody@x.com", "password": "pw123456" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "U001");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "bad", "password": "pw123456" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_token_endpoints_require_header() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new()
                .configure(|cfg| context.register(cfg))
                .configure(configure_all_routes),
        )
        .await;

        for uri in ["/api/auth/refresh", "/api/auth/logout"] {
            let req = test::TestRequest::post().uri(uri).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), 401);
        }
        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }
}
