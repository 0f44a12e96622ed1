//! Todo Repository
//!
//! 할일 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use todo_core::{NewTodo, StoreResult, Todo, TodoStore, UserSummary};

/// todos + 작성자 조인 레코드
#[derive(Debug, Clone, FromRow)]
struct TodoRecord {
    id: i64,
    title: String,
    contents: String,
    weather: String,
    user_id: i64,
    user_email: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo {
            id: record.id,
            title: record.title,
            contents: record.contents,
            weather: record.weather,
            user: UserSummary {
                id: record.user_id,
                email: record.user_email,
            },
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }
}

const SELECT_TODO: &str = r#"
    SELECT t.id, t.title, t.contents, t.weather,
           u.id AS user_id, u.email AS user_email,
           t.created_at, t.modified_at
    FROM todos t
    JOIN users u ON u.id = t.user_id
"#;

/// PostgreSQL 할일 저장소
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoRepository {
    async fn save(&self, todo: NewTodo) -> StoreResult<Todo> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at, modified_at): (i64, DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO todos (title, contents, weather, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, modified_at
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.contents)
        .bind(&todo.weather)
        .bind(todo.user_id)
        .fetch_one(&mut *tx)
        .await?;

        // 작성자를 첫 담당자로 등록
        sqlx::query("INSERT INTO managers (user_id, todo_id) VALUES ($1, $2)")
            .bind(todo.user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let email: String = sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
            .bind(todo.user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Todo {
            id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: UserSummary {
                id: todo.user_id,
                email,
            },
            created_at,
            modified_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        let record = sqlx::query_as::<_, TodoRecord>(&format!("{SELECT_TODO} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Todo::from))
    }

    async fn find_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<Todo>, i64)> {
        let records = sqlx::query_as::<_, TodoRecord>(&format!(
            "{SELECT_TODO} ORDER BY t.modified_at DESC, t.id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        Ok((records.into_iter().map(Todo::from).collect(), total))
    }
}
