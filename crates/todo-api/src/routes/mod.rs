//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/auth` - 회원가입/로그인 (인증 불필요)
//! - `/todos` - 할일, 하위에 `/comments`, `/managers`
//! - `/users` - 유저 조회, 비밀번호 변경
//! - `/admin` - 관리자 전용 (역할 변경, 댓글 삭제)

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod managers;
pub mod todos;
pub mod users;

pub use admin::{admin_router, ChangeRoleRequest};
pub use auth::{auth_router, SigninRequest, SignupRequest, TokenResponse};
pub use comments::{comments_router, CommentRequest, CommentResponse};
pub use health::{health_router, HealthResponse};
pub use managers::{managers_router, ManagerRequest, ManagerResponse};
pub use todos::{todos_router, CreateTodoRequest, CreateTodoResponse, PageQuery, TodoResponse};
pub use users::{users_router, ChangePasswordRequest};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 관리자 라우터의 인가 미들웨어가 상태를 필요로 하므로 `state`를 받습니다.
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/todos", todos_router())
        .nest("/todos/{todo_id}/comments", comments_router())
        .nest("/todos/{todo_id}/managers", managers_router())
        .nest("/users", users_router())
        .nest("/admin", admin_router(state))
}
