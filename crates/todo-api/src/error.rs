//! API 에러 타입과 응답 형식.
//!
//! 서비스 계층은 [`ServiceError`]를 반환하고, 핸들러는 이를 그대로 반환합니다.
//! HTTP 상태 코드 매핑:
//!
//! | 에러 | 상태 |
//! |------|------|
//! | `InvalidRequest` | 400 |
//! | `AuthFailure::Forbidden` | 403 |
//! | 그 외 `AuthFailure` | 401 |
//! | `Server`, `Store` | 500 |
//!
//! 어떤 에러도 자동으로 재시도하지 않습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::StoreError;
use utoipa::ToSchema;

use crate::auth::{PasswordError, TokenError};
use crate::metrics::record_auth_failure;

/// 통합 API 에러 응답.
///
/// ```json
/// {
///   "code": "INVALID_REQUEST",
///   "message": "이미 존재하는 이메일입니다.",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_REQUEST", "UNAUTHORIZED", "FORBIDDEN")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 조회 대상 엔티티 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Todo,
    Manager,
    Comment,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Entity::User => "User",
            Entity::Todo => "Todo",
            Entity::Manager => "Manager",
            Entity::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// 잘못된 요청 (400).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("유효하지 않은 UserRole")]
    BadRole,
    #[error("이미 존재하는 이메일입니다.")]
    DuplicateEmail,
    #[error("가입되지 않은 유저입니다.")]
    UserNotFound,
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("담당자를 등록하려고 하는 유저가 일정을 만든 유저가 유효하지 않습니다.")]
    NotTodoOwner,
    #[error("등록하려고 하는 담당자 유저가 존재하지 않습니다.")]
    ManagerUserMissing,
    #[error("일정 작성자는 본인을 담당자로 등록할 수 없습니다.")]
    SelfAssignment,
    #[error("해당 일정을 만든 유저가 유효하지 않습니다.")]
    InvalidTodoOwner,
    #[error("해당 일정에 등록된 담당자가 아닙니다.")]
    ManagerNotInTodo,
    #[error("새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다.")]
    WeakPassword,
    #[error("새 비밀번호는 기존 비밀번호와 같을 수 없습니다.")]
    SamePassword,
    #[error("잘못된 비밀번호입니다.")]
    WrongPassword,
    #[error("{0}")]
    Validation(String),
}

/// 인증/인가 실패 (401, Forbidden만 403).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("잘못된 비밀번호입니다.")]
    BadCredentials,
    #[error("JWT 토큰이 필요합니다.")]
    MissingHeader,
    #[error(transparent)]
    Token(TokenError),
    #[error("관리자 권한이 없습니다.")]
    Forbidden,
}

impl AuthFailure {
    /// 메트릭 라벨용 짧은 이름.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::BadCredentials => "bad_credentials",
            AuthFailure::MissingHeader => "missing_header",
            AuthFailure::Token(e) => e.reason(),
            AuthFailure::Forbidden => "forbidden",
        }
    }
}

/// 서비스 계층 에러.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),
    #[error(transparent)]
    Auth(#[from] AuthFailure),
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 서비스 결과 타입.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(msg) => ServiceError::Server(msg),
            other => ServiceError::Auth(AuthFailure::Token(other)),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Server(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::InvalidRequest(InvalidRequest::Validation(err.to_string()))
    }
}

impl ServiceError {
    /// HTTP 상태 코드와 에러 코드.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServiceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServiceError::Auth(AuthFailure::Forbidden) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ServiceError::Auth(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ServiceError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
            ServiceError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            ServiceError::Auth(failure) => {
                record_auth_failure(failure.reason());
                tracing::debug!(reason = failure.reason(), "인증 실패");
            }
            ServiceError::Server(msg) => tracing::error!(error = %msg, "서버 에러"),
            ServiceError::Store(err) => tracing::error!(error = %err, "저장소 에러"),
            ServiceError::InvalidRequest(_) => {}
        }

        (status, Json(ApiErrorResponse::new(code, self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_serialization() {
        let error = ApiErrorResponse::new("INVALID_REQUEST", "Todo not found");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["code"], "INVALID_REQUEST");
        assert_eq!(json["message"], "Todo not found");
        assert!(json["timestamp"].is_i64());

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["code", "message", "timestamp"]);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(InvalidRequest::NotFound(Entity::Todo).to_string(), "Todo not found");
        assert_eq!(InvalidRequest::NotFound(Entity::Manager).to_string(), "Manager not found");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::from(InvalidRequest::DuplicateEmail), StatusCode::BAD_REQUEST),
            (ServiceError::from(AuthFailure::BadCredentials), StatusCode::UNAUTHORIZED),
            (ServiceError::from(AuthFailure::MissingHeader), StatusCode::UNAUTHORIZED),
            (ServiceError::from(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (ServiceError::from(AuthFailure::Forbidden), StatusCode::FORBIDDEN),
            (
                ServiceError::from(StoreError::Database("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::Server("weather".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_token_encoding_error_is_server_error() {
        let err = ServiceError::from(TokenError::Encoding("key".into()));
        assert!(matches!(err, ServiceError::Server(_)));
    }

    #[test]
    fn test_token_error_message_is_passed_through() {
        let err = ServiceError::from(TokenError::InvalidSignature);
        assert_eq!(err.to_string(), "유효하지 않는 JWT 서명입니다.");
    }
}
