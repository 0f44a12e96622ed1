//! 할일 endpoint.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todo_core::{Todo, TodoPage, UserSummary};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

/// 할일 생성 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, message = "제목을 입력해 주세요."))]
    pub title: String,
    #[validate(length(min = 1, message = "내용을 입력해 주세요."))]
    pub contents: String,
}

/// 할일 생성 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
}

impl From<Todo> for CreateTodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: todo.user,
        }
    }
}

/// 할일 상세 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: todo.user,
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// 페이지 쿼리 (1부터 시작).
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// 할일 생성.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "생성 성공", body = CreateTodoResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 500, description = "날씨 조회 실패", body = ApiErrorResponse)
    )
)]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateTodoRequest>,
) -> ServiceResult<Json<CreateTodoResponse>> {
    request.validate()?;

    let todo = state
        .todos
        .create(&user, request.title, request.contents)
        .await?;

    Ok(Json(todo.into()))
}

/// 할일 목록.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(PageQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "수정 시각 내림차순 페이지", body = TodoPage),
        (status = 400, description = "잘못된 페이지 파라미터", body = ApiErrorResponse)
    )
)]
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<PageQuery>,
) -> ServiceResult<Json<TodoPage>> {
    Ok(Json(state.todos.list(query.page, query.size).await?))
}

/// 할일 상세.
#[utoipa::path(
    get,
    path = "/todos/{todoId}",
    tag = "todos",
    params(("todoId" = i64, Path, description = "할일 ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "할일", body = TodoResponse),
        (status = 400, description = "Todo not found", body = ApiErrorResponse)
    )
)]
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(todo_id): Path<i64>,
) -> ServiceResult<Json<TodoResponse>> {
    Ok(Json(state.todos.get(todo_id).await?.into()))
}

pub fn todos_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{todo_id}", get(get_todo))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, signup, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_todo() {
        let (app, _) = test_app();
        let token = signup(&app, "a@a.com", "USER").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/todos",
            Some(&token),
            Some(json!({"title": "장보기", "contents": "우유"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weather"], "Sunny");
        assert_eq!(body["user"]["email"], "a@a.com");

        let id = body["id"].as_i64().unwrap();
        let (status, body) = send(&app, Method::GET, &format!("/todos/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "장보기");
        assert!(body["createdAt"].is_string());
        assert!(body["modifiedAt"].is_string());
    }

    #[tokio::test]
    async fn test_todos_require_token() {
        let (app, _) = test_app();

        let (status, body) = send(&app, Method::GET, "/todos", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = send(&app, Method::GET, "/todos", Some("Bearer garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_todos_page() {
        let (app, _) = test_app();
        let token = signup(&app, "a@a.com", "USER").await;

        for i in 0..3 {
            send(
                &app,
                Method::POST,
                "/todos",
                Some(&token),
                Some(json!({"title": format!("t{i}"), "contents": "c"})),
            )
            .await;
        }

        let (status, body) = send(&app, Method::GET, "/todos?page=1&size=2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"].as_array().unwrap().len(), 2);
        assert_eq!(body["totalElements"], 3);
        assert_eq!(body["totalPages"], 2);

        let (status, _) = send(&app, Method::GET, "/todos?page=0", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_todo_is_400() {
        let (app, _) = test_app();
        let token = signup(&app, "a@a.com", "USER").await;

        let (status, body) = send(&app, Method::GET, "/todos/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Todo not found");
    }
}
