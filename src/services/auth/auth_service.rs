//! # 인증 오케스트레이터
//!
//! 회원가입, 로그인, 토큰 갱신, 로그아웃, 소셜 로그인 완료, 요청 시점 토큰 해석을
//! 하나의 서비스로 묶습니다. 저장소와 코덱은 생성자로 주입받습니다.
//!
//! ## 토큰 수명주기
//!
//! ```text
//! signup / login / oauth ──▶ (access, refresh) 발급 ──▶ refresh_token:{id} 저장
//!                                                          │
//! refresh(refresh) ── 저장값과 일치? ── 예 ──▶ 새 쌍 발급, 덮어쓰기 (회전)
//!                                  └─ 아니오 ─▶ InvalidToken
//!
//! logout(access) ──▶ refresh_token:{id} 삭제
//! ```
//!
//! 회전 후에는 이전 리프레시 토큰이 만료 전이라도 거부됩니다.
//! 같은 사용자의 동시 갱신은 마지막 쓰기가 남고, 진 쪽의 다음 갱신은 `InvalidToken`입니다.

use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::CanonicalIdentity;
use crate::domain::models::token::token::TokenKind;
use crate::repositories::tokens::RefreshTokenRepository;
use crate::repositories::users::user_repo::UserStore;
use crate::services::auth::password::PasswordHasher;
use crate::services::auth::token_service::TokenService;
use crate::services::email::VerificationService;
use crate::utils::string_utils::validate_required_string;

/// 인증 오케스트레이터
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
    sessions: RefreshTokenRepository,
    verification: Arc<VerificationService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
        sessions: RefreshTokenRepository,
        verification: Arc<VerificationService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            sessions,
            verification,
        }
    }

    /// 이메일/비밀번호 회원가입
    ///
    /// 이메일 인증 완료 플래그가 있어야 하며, 가입이 끝나면 플래그를 지웁니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateEmail` - 이미 가입된 이메일
    /// * `AppError::EmailNotVerified` - 인증 완료 플래그 없음
    /// * `AppError::ValidationError` - 공백뿐인 닉네임
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let response = auth_service.signup(SignupRequest {
    ///     email: "u@x.com".into(),
    ///     password: "pw123456".into(),
    ///     username: "Name".into(),
    /// }).await?;
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        log::info!("회원가입 시도: {}", request.email);

        if self.users.exists_by_email(&request.email).await? {
            return Err(AppError::DuplicateEmail);
        }
        if !self.verification.is_verified(&request.email).await? {
            log::warn!("이메일 미인증 회원가입 시도: {}", request.email);
            return Err(AppError::EmailNotVerified);
        }

        let username = validate_required_string(&request.username, "username")?;
        let password_hash = self.hasher.hash(&request.password)?;
        let user = self
            .users
            .save(User::new_local(request.email, username, password_hash))
            .await?;

        let response = self.issue_session(&user).await?;
        self.verification.clear_verified(&user.email).await?;

        log::info!("회원가입 성공: userId={}, email={}", response.user_id, user.email);
        Ok(response)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 비밀번호가 틀리면 저장소에 아무것도 쓰지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UserNotFound` - 가입되지 않은 이메일
    /// * `AppError::InvalidPassword` - 비밀번호 불일치
    /// * `AppError::InactiveUser` - 비활성 또는 탈퇴 계정
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        log::info!("로그인 시도: {}", request.email);

        let mut user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !self.hasher.matches(&request.password, &user.password_hash) {
            log::warn!("비밀번호 불일치: {}", request.email);
            return Err(AppError::InvalidPassword);
        }
        if !user.is_usable() {
            log::warn!("비활성 계정 로그인 시도: {}", request.email);
            return Err(AppError::InactiveUser);
        }

        user.touch_login();
        let user = self.users.save(user).await?;

        let response = self.issue_session(&user).await?;
        log::info!("로그인 성공: userId={}", response.user_id);
        Ok(response)
    }

    /// 리프레시 토큰으로 토큰 쌍 재발급 (회전)
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 검증 실패, 리프레시 토큰이 아님, 저장된 세션과 불일치
    /// * `AppError::UserNotFound` - 토큰 주체가 더 이상 없음
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let refresh_token = TokenService::strip_bearer(refresh_token);
        let user_id = self.subject_of_kind(refresh_token, TokenKind::Refresh)?;

        if !self.sessions.matches(user_id, refresh_token).await? {
            log::warn!("저장된 리프레시 세션과 불일치: userId={}", user_id);
            return Err(AppError::InvalidToken);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let response = self.issue_session(&user).await?;
        log::info!("액세스 토큰 갱신 성공: userId={}", user_id);
        Ok(response)
    }

    /// 로그아웃 (리프레시 세션 삭제)
    ///
    /// 이미 발급된 액세스 토큰은 만료까지 유효합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 검증 실패 또는 액세스 토큰이 아님
    pub async fn logout(&self, access_token: &str) -> AppResult<()> {
        let access_token = TokenService::strip_bearer(access_token);
        let user_id = self.subject_of_kind(access_token, TokenKind::Access)?;

        self.sessions.delete(user_id).await?;
        log::info!("로그아웃 성공: userId={}", user_id);
        Ok(())
    }

    /// 소셜 로그인 완료
    ///
    /// 이메일로 기존 사용자를 찾아 연결하거나 새로 만든 뒤 로그인과 같은 방식으로 토큰을 발급합니다.
    /// 새 계정의 비밀번호 자리에는 어떤 비밀번호와도 일치하지 않는 값이 들어갑니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 프로바이더가 이메일을 주지 않음
    pub async fn complete_oauth_login(
        &self,
        identity: CanonicalIdentity,
    ) -> AppResult<AuthResponse> {
        let email = identity.email.clone().ok_or_else(|| {
            AppError::ValidationError(format!(
                "{} 계정에서 이메일을 가져올 수 없습니다",
                identity.provider
            ))
        })?;

        let mut user = match self.users.find_by_email(&email).await? {
            Some(mut existing) => {
                if existing.provider.is_none() {
                    log::info!("기존 계정에 {} 연결: {}", identity.provider, email);
                    existing.attach_provider(identity.provider, identity.provider_id.clone());
                }
                existing
            }
            None => {
                log::info!("새 {} 사용자 등록: {}", identity.provider, email);
                let username = identity.display_name().unwrap_or_else(|| email.clone());
                let mut created = User::new_oauth(
                    email.clone(),
                    username,
                    identity.provider,
                    identity.provider_id.clone(),
                );
                created.birth_date = identity.birth_date;
                created.gender = identity.gender;
                created
            }
        };

        user.update_profile_image(identity.profile_image_url);
        user.touch_login();
        let user = self.users.save(user).await?;

        let response = self.issue_session(&user).await?;
        log::info!("OAuth2 로그인 성공: userId={}, provider={}", response.user_id, identity.provider);
        Ok(response)
    }

    /// 요청의 Authorization 헤더 값을 사용자로 해석
    ///
    /// `Bearer ` 접두사는 있으면 제거합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 검증 실패 또는 액세스 토큰이 아님
    /// * `AppError::UserNotFound` - 토큰 주체가 없음
    /// * `AppError::InactiveUser` - 비활성 또는 탈퇴 계정
    pub async fn resolve_identity(&self, header_value: &str) -> AppResult<User> {
        let token = TokenService::strip_bearer(header_value);
        let user_id = self.subject_of_kind(token, TokenKind::Access)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_usable() {
            return Err(AppError::InactiveUser);
        }
        Ok(user)
    }

    /// 토큰을 검증하고 기대한 종류일 때만 주체를 돌려줍니다.
    fn subject_of_kind(&self, token: &str, expected: TokenKind) -> AppResult<i64> {
        let claims = self.tokens.claims(token).map_err(|_| {
            log::warn!("유효하지 않은 {:?} 토큰", expected);
            AppError::InvalidToken
        })?;

        if claims.kind != expected {
            log::warn!("토큰 종류 불일치: 기대 {:?}, 실제 {:?}", expected, claims.kind);
            return Err(AppError::InvalidToken);
        }

        claims.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// 새 토큰 쌍을 발급하고 리프레시 세션을 덮어씁니다.
    async fn issue_session(&self, user: &User) -> AppResult<AuthResponse> {
        let user_id = user.require_id()?;
        let pair = self.tokens.issue_pair(user_id, &user.email)?;

        self.sessions.save(user_id, &pair.refresh_token).await?;
        AuthResponse::issued(user, pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::caching::{MemoryTtlStore, TtlStore};
    use crate::config::{AuthProvider, JwtConfig};
    use crate::domain::entities::users::user::{Gender, OAUTH_PASSWORD_SENTINEL};
    use crate::repositories::users::user_repo::MemoryUserRepository;
    use crate::services::auth::password::BcryptPasswordHasher;
    use crate::test_support::{RecordingMailSender, TEST_JWT_SECRET};

    struct Fixture {
        store: Arc<MemoryTtlStore>,
        users: Arc<MemoryUserRepository>,
        verification: Arc<VerificationService>,
        tokens: TokenService,
        auth: AuthService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryTtlStore::new());
        let users = Arc::new(MemoryUserRepository::new());
        let verification = Arc::new(VerificationService::new(
            store.clone(),
            users.clone(),
            Arc::new(RecordingMailSender::default()),
            "Sparring",
        ));
        let jwt = JwtConfig::new(TEST_JWT_SECRET, 3600, 1_209_600).unwrap();
        let auth = AuthService::new(
            users.clone(),
            Arc::new(BcryptPasswordHasher::new(4)),
            TokenService::new(&jwt),
            RefreshTokenRepository::new(store.clone(), jwt.refresh_token_ttl_secs),
            verification.clone(),
        );

        Fixture {
            store,
            users,
            verification,
            tokens: TokenService::new(&jwt),
            auth,
        }
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "pw123456".to_string(),
            username: "Name".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn verify_email(f: &Fixture, email: &str) {
        let code = f.verification.issue_code(email).await.unwrap();
        f.verification.verify(email, &code).await.unwrap();
    }

    async fn signed_up(f: &Fixture, email: &str) -> AuthResponse {
        verify_email(f, email).await;
        f.auth.signup(signup_request(email)).await.unwrap()
    }

    fn identity(provider: AuthProvider, email: Option<&str>) -> CanonicalIdentity {
        CanonicalIdentity {
            provider_id: "provider-1".to_string(),
            provider,
            email: email.map(str::to_string),
            name: Some("Social".to_string()),
            profile_image_url: Some("https://img/1.png".to_string()),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 12, 25),
            gender: Some(Gender::Male),
        }
    }

    #[actix_web::test]
    async fn test_signup_issues_first_user_and_distinct_tokens() {
        let f = fixture();

        let response = signed_up(&f, "u@x.com").await;

        assert_eq!(response.user_id, 1);
        assert_eq!(response.email, "u@x.com");
        assert_eq!(response.username, "Name");
        assert_eq!(response.token_type, "Bearer");
        let refresh_token = response.refresh_token.clone().unwrap();
        assert!(!response.access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(response.access_token, refresh_token);
        assert_eq!(
            f.store.get("refresh_token:1").await.unwrap(),
            Some(refresh_token)
        );
    }

    #[actix_web::test]
    async fn test_signup_hashes_password_and_clears_verified_flag() {
        let f = fixture();
        signed_up(&f, "u@x.com").await;

        let stored = f.users.find_by_email("u@x.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw123456");
        assert!(stored.provider.is_none());
        assert!(!f.verification.is_verified("u@x.com").await.unwrap());
    }

    #[actix_web::test]
    async fn test_signup_requires_verified_email() {
        let f = fixture();

        assert!(matches!(
            f.auth.signup(signup_request("u@x.com")).await,
            Err(AppError::EmailNotVerified)
        ));
        assert!(!f.users.exists_by_email("u@x.com").await.unwrap());
    }

    #[actix_web::test]
    async fn test_signup_rejects_duplicate_email() {
        let f = fixture();
        signed_up(&f, "u@x.com").await;

        assert!(matches!(
            f.auth.signup(signup_request("u@x.com")).await,
            Err(AppError::DuplicateEmail)
        ));
    }

    #[actix_web::test]
    async fn test_signup_with_wrong_then_right_code() {
        let f = fixture();
        let code = f.verification.issue_code("u@x.com").await.unwrap();
        let wrong = if code == "123456" { "654321" } else { "123456" };

        assert!(matches!(
            f.verification.verify("u@x.com", wrong).await,
            Err(AppError::InvalidCode)
        ));
        f.verification.verify("u@x.com", &code).await.unwrap();
        assert!(f.auth.signup(signup_request("u@x.com")).await.is_ok());
        assert!(matches!(
            f.verification.verify("u@x.com", &code).await,
            Err(AppError::ExpiredCode)
        ));
    }

    #[actix_web::test]
    async fn test_login_success_rotates_session() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        let login = f.auth.login(login_request("u@x.com", "pw123456")).await.unwrap();

        assert_eq!(login.user_id, signup.user_id);
        assert_ne!(login.refresh_token, signup.refresh_token);
        assert_eq!(f.store.get("refresh_token:1").await.unwrap(), login.refresh_token);
        let stored = f.users.find_by_id(1).await.unwrap().unwrap();
        assert!(stored.last_login_at.is_some());
    }

    #[actix_web::test]
    async fn test_login_wrong_password_writes_nothing() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        assert!(matches!(
            f.auth.login(login_request("u@x.com", "wrong-password")).await,
            Err(AppError::InvalidPassword)
        ));
        assert_eq!(f.store.get("refresh_token:1").await.unwrap(), signup.refresh_token);
        assert!(f.users.find_by_id(1).await.unwrap().unwrap().last_login_at.is_none());
    }

    #[actix_web::test]
    async fn test_login_wrong_password_on_fresh_store_leaves_no_session() {
        let f = fixture();
        let hash = bcrypt::hash("pw123456", 4).unwrap();
        f.users
            .save(User::new_local("u@x.com".into(), "Name".into(), hash))
            .await
            .unwrap();

        assert!(f.auth.login(login_request("u@x.com", "nope-nope")).await.is_err());
        assert_eq!(f.store.live_len(), 0);
    }

    #[actix_web::test]
    async fn test_login_unknown_email() {
        let f = fixture();

        assert!(matches!(
            f.auth.login(login_request("nobody@x.com", "pw123456")).await,
            Err(AppError::UserNotFound)
        ));
    }

    #[actix_web::test]
    async fn test_login_inactive_user() {
        let f = fixture();
        signed_up(&f, "u@x.com").await;
        let mut user = f.users.find_by_id(1).await.unwrap().unwrap();
        user.deactivate();
        f.users.save(user).await.unwrap();

        assert!(matches!(
            f.auth.login(login_request("u@x.com", "pw123456")).await,
            Err(AppError::InactiveUser)
        ));
    }

    #[actix_web::test]
    async fn test_oauth_only_user_cannot_password_login() {
        let f = fixture();
        f.auth
            .complete_oauth_login(identity(AuthProvider::Kakao, Some("k@x.com")))
            .await
            .unwrap();

        for password in ["", OAUTH_PASSWORD_SENTINEL, "pw123456"] {
            assert!(matches!(
                f.auth.login(login_request("k@x.com", password)).await,
                Err(AppError::InvalidPassword)
            ));
        }
    }

    #[actix_web::test]
    async fn test_refresh_rotation() {
        let f = fixture();
        let t1 = signed_up(&f, "u@x.com").await.refresh_token.unwrap();

        let t2 = f.auth.refresh(&t1).await.unwrap().refresh_token.unwrap();
        assert_ne!(t1, t2);

        assert!(matches!(f.auth.refresh(&t1).await, Err(AppError::InvalidToken)));
        let t3 = f.auth.refresh(&t2).await.unwrap();
        assert_eq!(t3.user_id, 1);
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token_and_garbage() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        assert!(matches!(
            f.auth.refresh(&signup.access_token).await,
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(f.auth.refresh("garbage").await, Err(AppError::InvalidToken)));
    }

    #[actix_web::test]
    async fn test_refresh_after_session_expiry_fails() {
        let f = fixture();
        let t1 = signed_up(&f, "u@x.com").await.refresh_token.unwrap();

        f.store.advance(Duration::from_secs(1_209_600 + 1));

        assert!(matches!(f.auth.refresh(&t1).await, Err(AppError::InvalidToken)));
    }

    #[actix_web::test]
    async fn test_refresh_for_missing_user() {
        let f = fixture();
        let orphan = f.tokens.issue_refresh(99).unwrap();
        f.store
            .set("refresh_token:99", &orphan, Duration::from_secs(60))
            .await
            .unwrap();

        assert!(matches!(f.auth.refresh(&orphan).await, Err(AppError::UserNotFound)));
    }

    #[actix_web::test]
    async fn test_logout_revokes_refresh_token() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        f.auth
            .logout(&format!("Bearer {}", signup.access_token))
            .await
            .unwrap();

        assert!(f.store.get("refresh_token:1").await.unwrap().is_none());
        assert!(matches!(
            f.auth.refresh(&signup.refresh_token.unwrap()).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[actix_web::test]
    async fn test_logout_requires_access_token() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        assert!(matches!(
            f.auth.logout(&signup.refresh_token.clone().unwrap()).await,
            Err(AppError::InvalidToken)
        ));
        assert!(f.store.get("refresh_token:1").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_oauth_creates_new_social_user() {
        let f = fixture();

        let response = f
            .auth
            .complete_oauth_login(identity(AuthProvider::Kakao, Some("k@x.com")))
            .await
            .unwrap();

        assert_eq!(response.user_id, 1);
        assert_eq!(response.username, "Social");
        let user = f.users.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(user.provider, Some(AuthProvider::Kakao));
        assert_eq!(user.provider_id.as_deref(), Some("provider-1"));
        assert_eq!(user.password_hash, OAUTH_PASSWORD_SENTINEL);
        assert_eq!(user.profile_image_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(user.birth_date, chrono::NaiveDate::from_ymd_opt(1990, 12, 25));
        assert_eq!(user.gender, Some(Gender::Male));
        assert!(user.last_login_at.is_some());
        assert_eq!(
            f.store.get("refresh_token:1").await.unwrap(),
            response.refresh_token
        );
    }

    #[actix_web::test]
    async fn test_oauth_links_existing_local_account() {
        let f = fixture();
        signed_up(&f, "u@x.com").await;

        let response = f
            .auth
            .complete_oauth_login(identity(AuthProvider::Google, Some("u@x.com")))
            .await
            .unwrap();

        assert_eq!(response.user_id, 1);
        let user = f.users.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(user.provider, Some(AuthProvider::Google));
        assert_eq!(user.username, "Name");
        assert!(f.auth.login(login_request("u@x.com", "pw123456")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_oauth_keeps_first_provider() {
        let f = fixture();
        f.auth
            .complete_oauth_login(identity(AuthProvider::Kakao, Some("k@x.com")))
            .await
            .unwrap();

        let mut google = identity(AuthProvider::Google, Some("k@x.com"));
        google.profile_image_url = None;
        f.auth.complete_oauth_login(google).await.unwrap();

        let user = f.users.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(user.provider, Some(AuthProvider::Kakao));
        assert_eq!(user.profile_image_url.as_deref(), Some("https://img/1.png"));
    }

    #[actix_web::test]
    async fn test_oauth_requires_email() {
        let f = fixture();

        assert!(matches!(
            f.auth
                .complete_oauth_login(identity(AuthProvider::Kakao, None))
                .await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_resolve_identity() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        let with_prefix = f
            .auth
            .resolve_identity(&format!("Bearer {}", signup.access_token))
            .await
            .unwrap();
        let without_prefix = f.auth.resolve_identity(&signup.access_token).await.unwrap();

        assert_eq!(with_prefix.id, Some(1));
        assert_eq!(without_prefix.id, Some(1));
    }

    #[actix_web::test]
    async fn test_resolve_identity_rejections() {
        let f = fixture();
        let signup = signed_up(&f, "u@x.com").await;

        assert!(matches!(
            f.auth
                .resolve_identity(&signup.refresh_token.clone().unwrap())
                .await,
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            f.auth.resolve_identity("Bearer not-a-token").await,
            Err(AppError::InvalidToken)
        ));

        let ghost = f.tokens.issue_access(42, "ghost@x.com").unwrap();
        assert!(matches!(
            f.auth.resolve_identity(&ghost).await,
            Err(AppError::UserNotFound)
        ));

        let mut user = f.users.find_by_id(1).await.unwrap().unwrap();
        user.deactivate();
        f.users.save(user).await.unwrap();
        assert!(matches!(
            f.auth.resolve_identity(&signup.access_token).await,
            Err(AppError::InactiveUser)
        ));
    }
}
