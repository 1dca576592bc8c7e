//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다.
//! 서비스 계층은 [`UserStore`] trait만 알고 있으며, 실제 구현은
//! MongoDB([`MongoUserRepository`]) 또는 프로세스 메모리([`MemoryUserRepository`])입니다.
//!
//! ## 특징
//!
//! - **순차 ID**: 사용자 ID는 1부터 증가하는 정수
//! - **이메일 유니크**: MongoDB는 유니크 인덱스, 메모리 구현은 이메일 인덱스로 보장
//! - **insert-or-update**: `save` 하나로 생성과 갱신을 모두 처리

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use mongodb::{
    bson::{doc, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::user::User;

const USERS_COLLECTION: &str = "users";
const COUNTERS_COLLECTION: &str = "counters";

/// 사용자 저장소 계약
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일 주소로 사용자 조회
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// ID로 사용자 조회
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// 해당 이메일의 사용자가 존재하는지 확인
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// 사용자 저장 (ID가 없으면 새 ID를 부여해 생성, 있으면 갱신)
    async fn save(&self, user: User) -> AppResult<User>;
}

/// MongoDB 사용자 리포지토리
///
/// ## 저장 구조
///
/// - **users**: `_id`가 정수 ID인 사용자 문서
/// - **counters**: `{ _id: "users", seq: <마지막 ID> }` 시퀀스 문서
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = MongoUserRepository::new(&database).await?;
///
/// let created = repo.save(User::new_local(email, username, hash)).await?;
/// let found = repo.find_by_email("john@example.com").await?;
/// ```
pub struct MongoUserRepository {
    users: Collection<User>,
    counters: Collection<Document>,
}

impl MongoUserRepository {
    /// 컬렉션 핸들을 준비하고 인덱스를 생성합니다.
    pub async fn new(database: &Database) -> AppResult<Self> {
        let db = database.get_database();
        let repo = Self {
            users: db.collection::<User>(USERS_COLLECTION),
            counters: db.collection::<Document>(COUNTERS_COLLECTION),
        };

        repo.create_indexes().await?;
        Ok(repo)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **이메일 유니크 인덱스** - 중복 이메일 방지 및 이메일 조회 최적화
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.users
            .create_index(email_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 사용자 시퀀스를 원자적으로 1 증가시키고 새 값을 반환합니다.
    async fn next_id(&self) -> AppResult<i64> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": USERS_COLLECTION },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("사용자 시퀀스 생성 실패".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.users
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = self
            .users
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let id = match user.id {
            Some(id) => id,
            None => self.next_id().await?,
        };
        user.id = Some(id);

        self.users
            .replace_one(doc! { "_id": id }, &user)
            .upsert(true)
            .await
            .map_err(|e| match e.kind.as_ref() {
                mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we))
                    if we.code == 11000 =>
                {
                    AppError::DuplicateEmail
                }
                _ => AppError::DatabaseError(e.to_string()),
            })?;

        Ok(user)
    }
}

/// 프로세스 메모리 사용자 리포지토리
///
/// 개발 환경(`STORE_BACKEND=memory`)과 테스트에서 사용합니다.
pub struct MemoryUserRepository {
    users: DashMap<i64, User>,
    /// 이메일 → 사용자 ID. 이메일 선점과 ID 배정을 한 엔트리 잠금 안에서 처리합니다.
    email_index: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.email_index.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.email_index.contains_key(email))
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let id = match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(entry) => match user.id {
                Some(id) if *entry.get() == id => id,
                _ => return Err(AppError::DuplicateEmail),
            },
            Entry::Vacant(entry) => {
                let id = user
                    .id
                    .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
                entry.insert(id);
                id
            }
        };
        user.id = Some(id);

        // 이메일이 바뀐 갱신이면 이전 이메일 선점을 해제
        if let Some(previous) = self.users.insert(id, user.clone()) {
            if previous.email != user.email {
                self.email_index
                    .remove_if(&previous.email, |_, owner| *owner == id);
            }
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_user(email: &str) -> User {
        User::new_local(email.to_string(), "Name".to_string(), "hash".to_string())
    }

    #[actix_web::test]
    async fn test_memory_save_assigns_sequential_ids() {
        let repo = MemoryUserRepository::new();

        let first = repo.save(local_user("a@x.com")).await.unwrap();
        let second = repo.save(local_user("b@x.com")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[actix_web::test]
    async fn test_memory_save_updates_existing_user() {
        let repo = MemoryUserRepository::new();
        let mut user = repo.save(local_user("a@x.com")).await.unwrap();

        user.username = "Renamed".to_string();
        repo.save(user).await.unwrap();

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.username, "Renamed");
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_memory_lookup_by_email() {
        let repo = MemoryUserRepository::new();
        repo.save(local_user("a@x.com")).await.unwrap();

        assert!(repo.exists_by_email("a@x.com").await.unwrap());
        assert!(!repo.exists_by_email("b@x.com").await.unwrap());
        assert_eq!(
            repo.find_by_email("a@x.com").await.unwrap().and_then(|u| u.id),
            Some(1)
        );
    }

    #[actix_web::test]
    async fn test_memory_rejects_duplicate_email() {
        let repo = MemoryUserRepository::new();
        repo.save(local_user("dup@x.com")).await.unwrap();

        let second = repo.save(local_user("dup@x.com")).await;

        assert!(matches!(second, Err(AppError::DuplicateEmail)));
        assert!(repo.find_by_id(2).await.unwrap().is_none());
        assert_eq!(
            repo.find_by_email("dup@x.com").await.unwrap().and_then(|u| u.id),
            Some(1)
        );
    }

    #[actix_web::test]
    async fn test_memory_concurrent_inserts_keep_one_row() {
        let repo = std::sync::Arc::new(MemoryUserRepository::new());

        let saves = (0..8).map(|_| {
            let repo = repo.clone();
            async move { repo.save(local_user("race@x.com")).await }
        });
        let results = futures_util::future::join_all(saves).await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(repo.users.len(), 1);
    }

    #[actix_web::test]
    async fn test_memory_email_change_releases_old_email() {
        let repo = MemoryUserRepository::new();
        let mut user = repo.save(local_user("old@x.com")).await.unwrap();
        let other = repo.save(local_user("other@x.com")).await.unwrap();

        user.email = "new@x.com".to_string();
        repo.save(user).await.unwrap();

        assert!(!repo.exists_by_email("old@x.com").await.unwrap());
        assert_eq!(
            repo.find_by_email("new@x.com").await.unwrap().and_then(|u| u.id),
            Some(1)
        );
        repo.save(local_user("old@x.com")).await.unwrap();

        // 다른 사용자가 쓰는 이메일로 변경 불가
        let mut taken = other;
        taken.email = "new@x.com".to_string();
        assert!(matches!(repo.save(taken).await, Err(AppError::DuplicateEmail)));
    }
}
