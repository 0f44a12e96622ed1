//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: i64,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
    /// 데이터베이스 상태 ("up" | "down" | "not_configured")
    pub database: String,
}

/// 간단한 헬스 체크 (liveness probe용).
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "서버 응답 가능"))
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "정상", body = HealthResponse),
        (status = 503, description = "데이터베이스 연결 실패", body = HealthResponse)
    )
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, status_code, database) = if state.db_pool.is_none() {
        ("healthy", StatusCode::OK, "not_configured")
    } else if state.is_db_healthy().await {
        ("healthy", StatusCode::OK, "up")
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE, "down")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database: database.to_string(),
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
