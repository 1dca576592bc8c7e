//! # 애플리케이션 컨텍스트
//!
//! 시작 시 설정([`AppConfig`])으로부터 저장소와 서비스를 한 번 조립합니다.
//! 전역 서비스 로케이터 없이, 조립된 서비스는 `web::Data`로 앱에 등록됩니다.
//!
//! ```text
//! AppConfig ──▶ TtlStore (Redis | Memory) ──┬─▶ RefreshTokenRepository ─┐
//!           └─▶ UserStore (Mongo | Memory) ─┼─▶ VerificationService ────┼─▶ AuthService
//!                                           └─▶ OAuthClient             │
//!           └─▶ JwtConfig ──▶ TokenService ─────────────────────────────┘
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::caching::{MemoryTtlStore, RedisClient, TtlStore};
use crate::config::{AppConfig, StoreBackend};
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::repositories::tokens::RefreshTokenRepository;
use crate::repositories::users::user_repo::{MemoryUserRepository, MongoUserRepository, UserStore};
use crate::services::auth::{AuthService, BcryptPasswordHasher, OAuthClient, TokenService};
use crate::services::email::{mail_sender_from_config, MailSender, VerificationService};

/// 조립된 서비스 묶음
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub verification: Arc<VerificationService>,
    pub oauth: Arc<OAuthClient>,
}

impl AppContext {
    /// 설정된 백엔드에 연결하고 서비스를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::StoreError` - Redis 연결 실패
    /// * `AppError::DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let mail = mail_sender_from_config(&config.mail)?;

        let (store, users): (Arc<dyn TtlStore>, Arc<dyn UserStore>) = match config.storage.backend
        {
            StoreBackend::Redis => {
                let redis = RedisClient::connect(&config.storage.redis_url).await?;
                let database = Database::connect(&config.storage).await?;
                let users = MongoUserRepository::new(&database).await?;
                (Arc::new(redis), Arc::new(users))
            }
            StoreBackend::Memory => {
                log::warn!("메모리 저장소 사용 중: 재시작하면 모든 데이터가 사라집니다");
                (
                    Arc::new(MemoryTtlStore::new()),
                    Arc::new(MemoryUserRepository::new()),
                )
            }
        };

        Self::assemble(config, store, users, mail)
    }

    /// 메모리 저장소로 조립합니다.
    pub fn in_memory(config: AppConfig, mail: Arc<dyn MailSender>) -> AppResult<Self> {
        Self::assemble(
            config,
            Arc::new(MemoryTtlStore::new()),
            Arc::new(MemoryUserRepository::new()),
            mail,
        )
    }

    /// 주어진 저장소와 메일 발송기로 서비스를 조립합니다.
    pub fn assemble(
        config: AppConfig,
        store: Arc<dyn TtlStore>,
        users: Arc<dyn UserStore>,
        mail: Arc<dyn MailSender>,
    ) -> AppResult<Self> {
        let verification = Arc::new(VerificationService::new(
            store.clone(),
            users.clone(),
            mail,
            config.mail.service_name.clone(),
        ));

        let auth = Arc::new(AuthService::new(
            users,
            Arc::new(BcryptPasswordHasher::new(config.password.bcrypt_cost)),
            TokenService::new(&config.jwt),
            RefreshTokenRepository::new(store.clone(), config.jwt.refresh_token_ttl_secs),
            verification.clone(),
        ));

        let oauth = Arc::new(OAuthClient::new(config.oauth.clone(), store)?);

        log::info!(
            "서비스 조립 완료: environment={:?}, backend={:?}",
            config.environment,
            config.storage.backend
        );

        Ok(Self {
            config: Arc::new(config),
            auth,
            verification,
            oauth,
        })
    }

    /// 서비스를 앱 데이터로 등록합니다.
    ///
    /// ```rust,ignore
    /// App::new()
    ///     .configure(|cfg| context.register(cfg))
    ///     .configure(configure_all_routes)
    /// ```
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.auth.clone()))
            .app_data(web::Data::from(self.verification.clone()))
            .app_data(web::Data::from(self.oauth.clone()));
    }
}
