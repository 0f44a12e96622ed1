//! 메모리 기반 store 구현 (테스트용).
//!
//! 모든 store trait을 하나의 구조체로 구현합니다. 외래 키는 PostgreSQL
//! 스키마와 같은 방식으로 검사합니다.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use todo_core::{
    Comment, CommentStore, Manager, ManagerStore, NewComment, NewManager, NewTodo, NewUser, Role,
    StoreError, StoreResult, Todo, TodoStore, User, UserStore, UserSummary,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    comments: BTreeMap<i64, Comment>,
    managers: BTreeMap<i64, Manager>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_summary(&self, user_id: i64) -> StoreResult<UserSummary> {
        self.users
            .get(&user_id)
            .map(User::summary)
            .ok_or_else(|| StoreError::Database(format!("foreign key: user {user_id}")))
    }

    fn ensure_todo(&self, todo_id: i64) -> StoreResult<()> {
        if self.todos.contains_key(&todo_id) {
            Ok(())
        } else {
            Err(StoreError::Database(format!("foreign key: todo {todo_id}")))
        }
    }
}

/// 메모리 store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이후의 모든 쓰기 작업을 실패시킵니다.
    pub fn fail_next_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!("email {}", user.email)));
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            modified_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        self.check_writable()?;
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
            user.modified_at = Utc::now();
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: Role) -> StoreResult<()> {
        self.check_writable()?;
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.role = role;
            user.modified_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn save(&self, todo: NewTodo) -> StoreResult<Todo> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let user = tables.user_summary(todo.user_id)?;

        let now = Utc::now();
        let saved = Todo {
            id: tables.next_id(),
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: user.clone(),
            created_at: now,
            modified_at: now,
        };
        let manager = Manager {
            id: tables.next_id(),
            user,
            todo_id: saved.id,
        };

        tables.todos.insert(saved.id, saved.clone());
        tables.managers.insert(manager.id, manager);
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<Todo>, i64)> {
        let tables = self.tables.read().await;

        let mut todos: Vec<Todo> = tables.todos.values().cloned().collect();
        todos.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = todos.len() as i64;
        let page = todos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn save(&self, comment: NewComment) -> StoreResult<Comment> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let user = tables.user_summary(comment.user_id)?;
        tables.ensure_todo(comment.todo_id)?;

        let saved = Comment {
            id: tables.next_id(),
            contents: comment.contents,
            user,
            todo_id: comment.todo_id,
            created_at: Utc::now(),
        };
        tables.comments.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.todo_id == todo_id)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        self.check_writable()?;
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl ManagerStore for MemoryStore {
    async fn save(&self, manager: NewManager) -> StoreResult<Manager> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let user = tables.user_summary(manager.user_id)?;
        tables.ensure_todo(manager.todo_id)?;

        let saved = Manager {
            id: tables.next_id(),
            user,
            todo_id: manager.todo_id,
        };
        tables.managers.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Manager>> {
        let tables = self.tables.read().await;
        Ok(tables
            .managers
            .values()
            .filter(|m| m.todo_id == todo_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Manager>> {
        Ok(self.tables.read().await.managers.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        self.check_writable()?;
        Ok(self.tables.write().await.managers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, email: &str) -> User {
        UserStore::save(
            store,
            NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let store = MemoryStore::new();
        user(&store, "a@a.com").await;

        let err = UserStore::save(
            &store,
            NewUser {
                email: "a@a.com".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Admin,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_todo_save_registers_owner_as_manager() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@a.com").await;

        let todo = TodoStore::save(
            &store,
            NewTodo {
                title: "t".to_string(),
                contents: "c".to_string(),
                weather: "Sunny".to_string(),
                user_id: owner.id,
            },
        )
        .await
        .unwrap();

        let managers = ManagerStore::find_by_todo_id(&store, todo.id).await.unwrap();
        assert_eq!(managers.len(), 1);
        assert_eq!(managers[0].user, owner.summary());
    }

    #[tokio::test]
    async fn test_page_is_newest_first() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@a.com").await;

        for i in 0..5 {
            TodoStore::save(
                &store,
                NewTodo {
                    title: format!("todo {i}"),
                    contents: String::new(),
                    weather: "Sunny".to_string(),
                    user_id: owner.id,
                },
            )
            .await
            .unwrap();
        }

        let (page, total) = store.find_page(0, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "todo 4");
        assert_eq!(page[1].title, "todo 3");

        let (last, _) = store.find_page(4, 2).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title, "todo 0");
    }

    #[tokio::test]
    async fn test_comment_requires_existing_todo() {
        let store = MemoryStore::new();
        let owner = user(&store, "a@a.com").await;

        let err = CommentStore::save(
            &store,
            NewComment {
                contents: "hi".to_string(),
                user_id: owner.id,
                todo_id: 999,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
