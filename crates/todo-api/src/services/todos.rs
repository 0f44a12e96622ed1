//! 할일 서비스.

use std::sync::Arc;

use todo_core::{NewTodo, Todo, TodoPage, TodoStore};

use super::weather::WeatherProvider;
use crate::auth::AuthUser;
use crate::error::{Entity, InvalidRequest, ServiceResult};

/// 페이지 크기 상한.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoStore>,
    weather: Arc<dyn WeatherProvider>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoStore>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { todos, weather }
    }

    /// 오늘 날씨와 함께 할일을 저장합니다. 작성자는 첫 담당자로 등록됩니다.
    pub async fn create(
        &self,
        user: &AuthUser,
        title: String,
        contents: String,
    ) -> ServiceResult<Todo> {
        let weather = self.weather.today_weather().await?;

        let todo = self
            .todos
            .save(NewTodo {
                title,
                contents,
                weather,
                user_id: user.id,
            })
            .await?;

        tracing::info!(todo_id = todo.id, user_id = user.id, "할일 생성");
        Ok(todo)
    }

    /// 수정 시각 내림차순 페이지 조회 (`page`는 1부터).
    pub async fn list(&self, page: i64, size: i64) -> ServiceResult<TodoPage> {
        if page < 1 {
            let message = "page는 1 이상이어야 합니다.".to_string();
            return Err(InvalidRequest::Validation(message).into());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(InvalidRequest::Validation(format!(
                "size는 1 이상 {MAX_PAGE_SIZE} 이하여야 합니다."
            ))
            .into());
        }

        let offset = (page - 1).saturating_mul(size);
        let (content, total) = self.todos.find_page(offset, size).await?;

        Ok(TodoPage::new(content, page, size, total))
    }

    pub async fn get(&self, todo_id: i64) -> ServiceResult<Todo> {
        Ok(self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::Todo))?)
    }
}
