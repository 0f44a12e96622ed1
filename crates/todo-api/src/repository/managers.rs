//! Manager Repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use todo_core::{Manager, ManagerStore, NewManager, StoreResult, UserSummary};

#[derive(Debug, Clone, FromRow)]
struct ManagerRecord {
    id: i64,
    user_id: i64,
    user_email: String,
    todo_id: i64,
}

impl From<ManagerRecord> for Manager {
    fn from(record: ManagerRecord) -> Self {
        Manager {
            id: record.id,
            user: UserSummary {
                id: record.user_id,
                email: record.user_email,
            },
            todo_id: record.todo_id,
        }
    }
}

const SELECT_MANAGER: &str = r#"
    SELECT m.id, m.user_id, u.email AS user_email, m.todo_id
    FROM managers m
    JOIN users u ON u.id = m.user_id
"#;

/// PostgreSQL 담당자 저장소
#[derive(Clone)]
pub struct PgManagerRepository {
    pool: PgPool,
}

impl PgManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerStore for PgManagerRepository {
    async fn save(&self, manager: NewManager) -> StoreResult<Manager> {
        let record = sqlx::query_as::<_, ManagerRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO managers (user_id, todo_id)
                VALUES ($1, $2)
                RETURNING id, user_id, todo_id
            )
            SELECT i.id, i.user_id, u.email AS user_email, i.todo_id
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(manager.user_id)
        .bind(manager.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Manager>> {
        let records =
            sqlx::query_as::<_, ManagerRecord>(&format!("{SELECT_MANAGER} WHERE m.todo_id = $1 ORDER BY m.id"))
                .bind(todo_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(records.into_iter().map(Manager::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Manager>> {
        let record = sqlx::query_as::<_, ManagerRecord>(&format!("{SELECT_MANAGER} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Manager::from))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
