//! 사용자 endpoint.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use todo_core::UserSummary;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

/// 비밀번호 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[utoipa::path(
    get,
    path = "/users/{userId}",
    tag = "users",
    params(("userId" = i64, Path, description = "유저 ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "유저", body = UserSummary),
        (status = 400, description = "User not found", body = ApiErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(user_id): Path<i64>,
) -> ServiceResult<Json<UserSummary>> {
    Ok(Json(state.users.get(user_id).await?))
}

/// 본인 비밀번호 변경.
#[utoipa::path(
    put,
    path = "/users",
    tag = "users",
    request_body = ChangePasswordRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "변경 성공"),
        (status = 400, description = "약한 비밀번호, 동일 비밀번호 또는 기존 비밀번호 불일치", body = ApiErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> ServiceResult<()> {
    state
        .users
        .change_password(&user, &request.old_password, &request.new_password)
        .await
}

pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", put(change_password))
        .route("/{user_id}", get(get_user))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, signup_with_password, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_user() {
        let (app, state) = test_app();
        let token = signup_with_password(&app, "a@a.com", "Password1", "USER").await;
        let id = state.codec.decode(&token).unwrap().user_id().unwrap();

        let (status, body) = send(&app, Method::GET, &format!("/users/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@a.com");

        let (status, body) = send(&app, Method::GET, "/users/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_change_password_then_signin() {
        let (app, _) = test_app();
        let token = signup_with_password(&app, "a@a.com", "Password1", "USER").await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({"oldPassword": "Password1", "newPassword": "Password2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::POST,
            "/auth/signin",
            None,
            Some(json!({"email": "a@a.com", "password": "Password2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_change_password_rejections() {
        let (app, _) = test_app();
        let token = signup_with_password(&app, "a@a.com", "Password1", "USER").await;

        let cases = [
            (
                "Password1",
                "weak",
                "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다.",
            ),
            (
                "Password1",
                "Password1",
                "새 비밀번호는 기존 비밀번호와 같을 수 없습니다.",
            ),
            ("Wrong1234", "Password2", "잘못된 비밀번호입니다."),
        ];

        for (old, new, message) in cases {
            let (status, body) = send(
                &app,
                Method::PUT,
                "/users",
                Some(&token),
                Some(json!({"oldPassword": old, "newPassword": new})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], message);
        }
    }
}
