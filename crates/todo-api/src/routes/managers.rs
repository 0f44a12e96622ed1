//! 담당자 endpoint.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todo_core::{Manager, UserSummary};
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerRequest {
    /// 담당자로 등록할 유저 ID
    pub manager_user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserSummary,
}

impl From<Manager> for ManagerResponse {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            user: manager.user,
        }
    }
}

/// 담당자 등록. 할일 작성자만 호출할 수 있습니다.
#[utoipa::path(
    post,
    path = "/todos/{todoId}/managers",
    tag = "managers",
    params(("todoId" = i64, Path, description = "할일 ID")),
    request_body = ManagerRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "등록 성공", body = ManagerResponse),
        (status = 400, description = "작성자가 아니거나 담당자 유저가 없음", body = ApiErrorResponse)
    )
)]
pub async fn assign_manager(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(todo_id): Path<i64>,
    Json(request): Json<ManagerRequest>,
) -> ServiceResult<Json<ManagerResponse>> {
    let manager = state
        .managers
        .assign(&user, todo_id, request.manager_user_id)
        .await?;

    Ok(Json(manager.into()))
}

#[utoipa::path(
    get,
    path = "/todos/{todoId}/managers",
    tag = "managers",
    params(("todoId" = i64, Path, description = "할일 ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "담당자 목록", body = [ManagerResponse]),
        (status = 400, description = "Todo not found", body = ApiErrorResponse)
    )
)]
pub async fn list_managers(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(todo_id): Path<i64>,
) -> ServiceResult<Json<Vec<ManagerResponse>>> {
    let managers = state.managers.list(todo_id).await?;
    Ok(Json(managers.into_iter().map(ManagerResponse::from).collect()))
}

/// 담당자 삭제.
#[utoipa::path(
    delete,
    path = "/todos/{todoId}/managers/{managerId}",
    tag = "managers",
    params(
        ("todoId" = i64, Path, description = "할일 ID"),
        ("managerId" = i64, Path, description = "담당자 ID")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 400, description = "작성자가 아니거나 다른 할일의 담당자", body = ApiErrorResponse)
    )
)]
pub async fn remove_manager(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((todo_id, manager_id)): Path<(i64, i64)>,
) -> ServiceResult<()> {
    state.managers.remove(&user, todo_id, manager_id).await
}

/// `/todos/{todo_id}/managers` 하위 라우터.
pub fn managers_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_managers).post(assign_manager))
        .route("/{manager_id}", delete(remove_manager))
}
