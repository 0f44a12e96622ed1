//! 댓글 서비스.

use std::sync::Arc;

use todo_core::{Comment, CommentStore, NewComment, TodoStore};

use crate::auth::AuthUser;
use crate::error::{Entity, InvalidRequest, ServiceResult};

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    todos: Arc<dyn TodoStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, todos: Arc<dyn TodoStore>) -> Self {
        Self { comments, todos }
    }

    pub async fn create(
        &self,
        user: &AuthUser,
        todo_id: i64,
        contents: String,
    ) -> ServiceResult<Comment> {
        if self.todos.find_by_id(todo_id).await?.is_none() {
            return Err(InvalidRequest::NotFound(Entity::Todo).into());
        }

        let comment = self
            .comments
            .save(NewComment {
                contents,
                user_id: user.id,
                todo_id,
            })
            .await?;

        tracing::debug!(comment_id = comment.id, todo_id, user_id = user.id, "댓글 작성");
        Ok(comment)
    }

    pub async fn list(&self, todo_id: i64) -> ServiceResult<Vec<Comment>> {
        Ok(self.comments.find_by_todo_id(todo_id).await?)
    }

    /// 관리자 댓글 삭제. 없는 댓글이면 아무 일도 하지 않습니다.
    pub async fn delete(&self, comment_id: i64) -> ServiceResult<()> {
        let deleted = self.comments.delete_by_id(comment_id).await?;
        tracing::info!(comment_id, deleted, "관리자 댓글 삭제");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use todo_core::{NewTodo, NewUser, Role, UserStore};

    async fn setup() -> (CommentService, Arc<MemoryStore>, AuthUser, i64) {
        let store = Arc::new(MemoryStore::new());
        let user = UserStore::save(
            store.as_ref(),
            NewUser {
                email: "a@a.com".to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap();
        let todo = TodoStore::save(
            store.as_ref(),
            NewTodo {
                title: "t".into(),
                contents: "c".into(),
                weather: "Sunny".into(),
                user_id: user.id,
            },
        )
        .await
        .unwrap();

        let auth = AuthUser {
            id: user.id,
            email: user.email,
            role: user.role,
        };
        (CommentService::new(store.clone(), store.clone()), store, auth, todo.id)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, _, user, todo_id) = setup().await;

        let comment = service.create(&user, todo_id, "hello".into()).await.unwrap();
        assert_eq!(comment.contents, "hello");
        assert_eq!(comment.user.email, "a@a.com");

        let comments = service.list(todo_id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, comment.id);
    }

    #[tokio::test]
    async fn test_create_on_unknown_todo() {
        let (service, _, user, _) = setup().await;

        let err = service.create(&user, 999, "hello".into()).await.unwrap_err();
        assert_eq!(err.to_string(), "Todo not found");
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _, user, todo_id) = setup().await;
        let comment = service.create(&user, todo_id, "bye".into()).await.unwrap();

        service.delete(comment.id).await.unwrap();
        assert!(service.list(todo_id).await.unwrap().is_empty());

        // 이미 삭제된 댓글
        service.delete(comment.id).await.unwrap();
    }
}
