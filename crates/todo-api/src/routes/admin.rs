//! 관리자 전용 endpoint.
//!
//! 라우터 전체에 [`require_admin`]이 걸려 있어 모든 요청이 감사 로그에 남습니다.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::require_admin;
use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

/// 역할 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    /// `USER` 또는 `ADMIN`
    pub role: String,
}

/// 유저 역할 변경.
#[utoipa::path(
    patch,
    path = "/admin/users/{userId}",
    tag = "admin",
    params(("userId" = i64, Path, description = "유저 ID")),
    request_body = ChangeRoleRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "변경 성공"),
        (status = 400, description = "잘못된 역할 또는 User not found", body = ApiErrorResponse),
        (status = 403, description = "관리자 아님", body = ApiErrorResponse)
    )
)]
pub async fn change_role(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(request): Json<ChangeRoleRequest>,
) -> ServiceResult<()> {
    state.users.change_role(user_id, &request.role).await
}

/// 댓글 삭제. 없는 댓글이어도 성공으로 응답합니다.
#[utoipa::path(
    delete,
    path = "/admin/comments/{commentId}",
    tag = "admin",
    params(("commentId" = i64, Path, description = "댓글 ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "관리자 아님", body = ApiErrorResponse)
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> ServiceResult<()> {
    state.comments.delete(comment_id).await
}

/// 관리자 라우터. 인가 미들웨어에 상태가 필요해 인자로 받습니다.
pub fn admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}", patch(change_role))
        .route("/comments/{comment_id}", delete(delete_comment))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

#[cfg(test)]
mod tests {
    use crate::audit::MemoryAuditSink;
    use crate::routes::test_support::{app_with_state, create_todo, send, signup};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_user_role_is_forbidden() {
        let audit = Arc::new(MemoryAuditSink::new());
        let mut state = create_test_state();
        state.audit = audit.clone();
        let app = app_with_state(Arc::new(state));

        let token = signup(&app, "u@a.com", "USER").await;
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/admin/users/1",
            Some(&token),
            Some(json!({"role": "ADMIN"})),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_admin_requires_token() {
        let app = app_with_state(Arc::new(create_test_state()));

        let (status, _) = send(&app, Method::DELETE, "/admin/comments/1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_change_role_is_audited() {
        let audit = Arc::new(MemoryAuditSink::new());
        let mut state = create_test_state();
        state.audit = audit.clone();
        let state = Arc::new(state);
        let app = app_with_state(state.clone());

        let admin = signup(&app, "admin@a.com", "ADMIN").await;
        let admin_id = state.codec.decode(&admin).unwrap().user_id().unwrap();
        let user = signup(&app, "u@a.com", "USER").await;
        let user_id = state.codec.decode(&user).unwrap().user_id().unwrap();

        let uri = format!("/admin/users/{user_id}");
        let (status, _) = send(
            &app,
            Method::PATCH,
            &uri,
            Some(&admin),
            Some(json!({"role": "ADMIN"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, admin_id);
        assert_eq!(entries[0].url, uri);
        assert_eq!(entries[0].method, "PATCH");
    }

    #[tokio::test]
    async fn test_admin_change_role_rejects_bad_role() {
        let app = app_with_state(Arc::new(create_test_state()));
        let admin = signup(&app, "admin@a.com", "ADMIN").await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/admin/users/1",
            Some(&admin),
            Some(json!({"role": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "유효하지 않은 UserRole");

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/admin/users/999",
            Some(&admin),
            Some(json!({"role": "USER"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_admin_delete_comment() {
        let app = app_with_state(Arc::new(create_test_state()));
        let admin = signup(&app, "admin@a.com", "ADMIN").await;
        let todo_id = create_todo(&app, &admin).await;

        let uri = format!("/todos/{todo_id}/comments");
        let (_, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&admin),
            Some(json!({"contents": "삭제될 댓글"})),
        )
        .await;
        let comment_id = body["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/admin/comments/{comment_id}"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, &uri, Some(&admin), None).await;
        assert!(body.as_array().unwrap().is_empty());

        // 없는 댓글 삭제도 성공
        let (status, _) = send(&app, Method::DELETE, "/admin/comments/999", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
