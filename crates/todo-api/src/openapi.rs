//! OpenAPI 문서화 설정.
//!
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//! 새 엔드포인트를 추가할 때는 핸들러에 `#[utoipa::path(...)]`를 달고
//! 아래 `paths(...)`, `components(schemas(...))`에 등록합니다.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use todo_core::{Todo, TodoPage, UserSummary};

use crate::error::ApiErrorResponse;
use crate::routes::{
    ChangePasswordRequest, ChangeRoleRequest, CommentRequest, CommentResponse,
    CreateTodoRequest, CreateTodoResponse, HealthResponse, ManagerRequest, ManagerResponse,
    SigninRequest, SignupRequest, TodoResponse, TokenResponse,
};

/// `bearer` 보안 스킴 등록.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Todo API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = r#"
# 할일 관리 REST API

- **인증**: 회원가입/로그인 시 `Bearer <jwt>` 토큰 발급
- **할일**: 작성 시 오늘 날씨를 함께 저장, 수정 시각 내림차순 페이지 조회
- **댓글/담당자**: 할일 단위로 관리
- **관리자**: 역할 변경, 댓글 삭제 (모든 접근은 감사 로그에 기록)

`/auth/*`, `/health*`를 제외한 모든 엔드포인트는 `Authorization: Bearer <token>` 헤더가 필요합니다.
"#
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "auth", description = "회원가입/로그인"),
        (name = "todos", description = "할일"),
        (name = "comments", description = "댓글"),
        (name = "managers", description = "담당자"),
        (name = "users", description = "유저"),
        (name = "admin", description = "관리자 전용")
    ),
    components(
        schemas(
            ApiErrorResponse,
            HealthResponse,
            SignupRequest,
            SigninRequest,
            TokenResponse,
            CreateTodoRequest,
            CreateTodoResponse,
            TodoResponse,
            Todo,
            TodoPage,
            UserSummary,
            CommentRequest,
            CommentResponse,
            ManagerRequest,
            ManagerResponse,
            ChangePasswordRequest,
            ChangeRoleRequest,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::auth::signup,
        crate::routes::auth::signin,

        crate::routes::todos::create_todo,
        crate::routes::todos::list_todos,
        crate::routes::todos::get_todo,

        crate::routes::comments::create_comment,
        crate::routes::comments::list_comments,

        crate::routes::managers::assign_manager,
        crate::routes::managers::list_managers,
        crate::routes::managers::remove_manager,

        crate::routes::users::get_user,
        crate::routes::users::change_password,

        crate::routes::admin::change_role,
        crate::routes::admin::delete_comment,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI
/// - `/api-docs/openapi.json` - OpenAPI JSON
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("Todo API"));
        assert!(json.contains("/auth/signup"));
        assert!(json.contains("/todos/{todoId}/managers/{managerId}"));
        assert!(json.contains("/admin/users/{userId}"));
        assert!(json.contains("TokenResponse"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }
}
