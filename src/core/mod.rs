//! # Core Module
//!
//! 애플리케이션 전역에서 쓰이는 에러 타입과 서비스 조립 컨텍스트를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현 (상태 코드 + 에러 코드)
//! - **자동 변환**: thiserror 기반 에러 체인 관리
//!
//! ### [`context`] - 서비스 조립
//! - **AppContext**: 설정으로부터 저장소와 서비스를 한 번 조립
//! - **명시적 주입**: 모든 의존성은 생성자 인자로 전달
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use sparring_auth::config::AppConfig;
//! use sparring_auth::core::context::AppContext;
//!
//! let config = AppConfig::from_env()?;
//! let context = AppContext::build(config).await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| context.register(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```
//!
//! ### 에러 처리
//!
//! ```rust,ignore
//! // 핸들러에서 AppError는 자동으로 HTTP 응답으로 변환됩니다
//! async fn login(
//!     auth_service: web::Data<AuthService>,
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let response = auth_service.login(payload.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod context;
pub mod errors;

pub use errors::*;
