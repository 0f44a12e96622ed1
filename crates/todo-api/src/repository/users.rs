//! User Repository
//!
//! 사용자 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use todo_core::{NewUser, Role, StoreError, StoreResult, User, UserStore};

// ================================================================================================
// Types
// ================================================================================================

/// users 테이블 레코드
#[derive(Debug, Clone, FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    password_hash: String,
    user_role: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = StoreError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = Role::parse(&record.user_role).ok_or_else(|| {
            StoreError::Corrupted(format!(
                "user {} role={}",
                record.id, record.user_role
            ))
        })?;

        Ok(User {
            id: record.id,
            email: record.email,
            password_hash: record.password_hash,
            role,
            created_at: record.created_at,
            modified_at: record.modified_at,
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, user_role, created_at, modified_at
    FROM users
"#;

// ================================================================================================
// Repository
// ================================================================================================

/// PostgreSQL 사용자 저장소
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        record.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        record.map(User::try_from).transpose()
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, user_role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, user_role, created_at, modified_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        User::try_from(record)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, modified_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_role(&self, id: i64, role: Role) -> StoreResult<()> {
        sqlx::query("UPDATE users SET user_role = $2, modified_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: &str) -> UserRecord {
        UserRecord {
            id: 1,
            email: "a@a.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            user_role: role.to_string(),
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_conversion() {
        let user = User::try_from(record("ADMIN")).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "a@a.com");
    }

    #[test]
    fn test_unknown_stored_role_is_corrupted() {
        let err = User::try_from(record("ROOT")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }
}
