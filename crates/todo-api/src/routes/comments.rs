//! 댓글 endpoint.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todo_core::{Comment, UserSummary};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "댓글 내용을 입력해 주세요."))]
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: comment.user,
        }
    }
}

/// 댓글 작성.
#[utoipa::path(
    post,
    path = "/todos/{todoId}/comments",
    tag = "comments",
    params(("todoId" = i64, Path, description = "할일 ID")),
    request_body = CommentRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "작성 성공", body = CommentResponse),
        (status = 400, description = "Todo not found", body = ApiErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(todo_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> ServiceResult<Json<CommentResponse>> {
    request.validate()?;

    let comment = state
        .comments
        .create(&user, todo_id, request.contents)
        .await?;

    Ok(Json(comment.into()))
}

/// 댓글 목록.
#[utoipa::path(
    get,
    path = "/todos/{todoId}/comments",
    tag = "comments",
    params(("todoId" = i64, Path, description = "할일 ID")),
    security(("bearer" = [])),
    responses((status = 200, description = "댓글 목록", body = [CommentResponse]))
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(todo_id): Path<i64>,
) -> ServiceResult<Json<Vec<CommentResponse>>> {
    let comments = state.comments.list(todo_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// `/todos/{todo_id}/comments` 하위 라우터.
pub fn comments_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_comments).post(create_comment))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_todo, send, signup, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_list_comments() {
        let (app, _) = test_app();
        let token = signup(&app, "a@a.com", "USER").await;
        let todo_id = create_todo(&app, &token).await;

        let uri = format!("/todos/{todo_id}/comments");
        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&token),
            Some(json!({"contents": "좋아요"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contents"], "좋아요");
        assert_eq!(body["user"]["email"], "a@a.com");

        let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_comment_on_unknown_todo() {
        let (app, _) = test_app();
        let token = signup(&app, "a@a.com", "USER").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/todos/999/comments",
            Some(&token),
            Some(json!({"contents": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Todo not found");
    }
}
