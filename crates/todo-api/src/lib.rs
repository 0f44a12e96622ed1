//! 할일 관리 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증과 관리자 인가
//! - 관리자 접근 감사 로그
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 비밀번호 해싱, 토큰 코덱, 인증 서비스, 인가 가드
//! - [`services`]: 할일/댓글/담당자/유저 비즈니스 로직
//! - [`repository`]: PostgreSQL store 구현
//! - [`audit`]: 관리자 접근 감사 로그
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod audit;
pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use audit::{AdminAccess, AuditSink, TracingAuditSink};
pub use auth::{
    hash_password, verify_password, AuthService, AuthUser, Claims, TokenCodec, TokenError,
};
pub use error::{ApiErrorResponse, AuthFailure, InvalidRequest, ServiceError, ServiceResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::create_api_router;
pub use state::{AppState, Stores};

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
