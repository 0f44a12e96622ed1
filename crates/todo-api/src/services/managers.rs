//! 담당자 서비스.
//!
//! 담당자 등록/삭제는 할일 작성자만 할 수 있습니다.

use std::sync::Arc;

use todo_core::{Manager, ManagerStore, NewManager, TodoStore, UserStore};

use crate::auth::AuthUser;
use crate::error::{Entity, InvalidRequest, ServiceResult};

#[derive(Clone)]
pub struct ManagerService {
    managers: Arc<dyn ManagerStore>,
    todos: Arc<dyn TodoStore>,
    users: Arc<dyn UserStore>,
}

impl ManagerService {
    pub fn new(
        managers: Arc<dyn ManagerStore>,
        todos: Arc<dyn TodoStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            managers,
            todos,
            users,
        }
    }

    /// 담당자 등록.
    pub async fn assign(
        &self,
        user: &AuthUser,
        todo_id: i64,
        manager_user_id: i64,
    ) -> ServiceResult<Manager> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::Todo))?;

        if todo.user.id != user.id {
            return Err(InvalidRequest::NotTodoOwner.into());
        }

        let manager_user = self
            .users
            .find_by_id(manager_user_id)
            .await?
            .ok_or(InvalidRequest::ManagerUserMissing)?;

        if manager_user.id == user.id {
            return Err(InvalidRequest::SelfAssignment.into());
        }

        let manager = self
            .managers
            .save(NewManager {
                user_id: manager_user.id,
                todo_id,
            })
            .await?;

        tracing::info!(manager_id = manager.id, todo_id, manager_user_id, "담당자 등록");
        Ok(manager)
    }

    /// 할일의 담당자 목록.
    pub async fn list(&self, todo_id: i64) -> ServiceResult<Vec<Manager>> {
        if self.todos.find_by_id(todo_id).await?.is_none() {
            return Err(InvalidRequest::NotFound(Entity::Todo).into());
        }

        Ok(self.managers.find_by_todo_id(todo_id).await?)
    }

    /// 담당자 삭제.
    pub async fn remove(
        &self,
        user: &AuthUser,
        todo_id: i64,
        manager_id: i64,
    ) -> ServiceResult<()> {
        if self.users.find_by_id(user.id).await?.is_none() {
            return Err(InvalidRequest::NotFound(Entity::User).into());
        }

        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::Todo))?;

        if todo.user.id != user.id {
            return Err(InvalidRequest::InvalidTodoOwner.into());
        }

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::Manager))?;

        if manager.todo_id != todo_id {
            return Err(InvalidRequest::ManagerNotInTodo.into());
        }

        self.managers.delete(manager_id).await?;
        tracing::info!(manager_id, todo_id, "담당자 삭제");
        Ok(())
    }
}
