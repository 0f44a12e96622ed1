//! Comment Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use todo_core::{Comment, CommentStore, NewComment, StoreResult, UserSummary};

#[derive(Debug, Clone, FromRow)]
struct CommentRecord {
    id: i64,
    contents: String,
    user_id: i64,
    user_email: String,
    todo_id: i64,
    created_at: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Comment {
            id: record.id,
            contents: record.contents,
            user: UserSummary {
                id: record.user_id,
                email: record.user_email,
            },
            todo_id: record.todo_id,
            created_at: record.created_at,
        }
    }
}

/// PostgreSQL 댓글 저장소
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentRepository {
    async fn save(&self, comment: NewComment) -> StoreResult<Comment> {
        let record = sqlx::query_as::<_, CommentRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (contents, user_id, todo_id)
                VALUES ($1, $2, $3)
                RETURNING id, contents, user_id, todo_id, created_at
            )
            SELECT i.id, i.contents, i.user_id, u.email AS user_email, i.todo_id, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(&comment.contents)
        .bind(comment.user_id)
        .bind(comment.todo_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Comment>> {
        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT c.id, c.contents, c.user_id, u.email AS user_email, c.todo_id, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.todo_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Comment::from).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
