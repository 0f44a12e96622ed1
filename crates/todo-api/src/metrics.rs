//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 인증 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설치하고 핸들을 반환합니다.
///
/// # Errors
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// 라우트 영역
// ============================================================================

/// 요청 경로가 속한 API 영역. 메트릭의 `area` 라벨로 쓰입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    /// `/admin/*` (관리자 전용, 감사 대상)
    Admin,
    /// `/auth/*` (회원가입/로그인)
    Auth,
    /// `/health*`
    Health,
    /// `/metrics`, `/swagger-ui`, `/api-docs` (수집 제외)
    Internal,
    /// 그 외 인증이 필요한 엔드포인트
    Api,
}

impl RouteArea {
    /// 첫 경로 세그먼트로 영역을 판별합니다.
    pub fn of(path: &str) -> Self {
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        match first {
            "admin" => Self::Admin,
            "auth" => Self::Auth,
            "health" => Self::Health,
            "metrics" | "swagger-ui" | "api-docs" => Self::Internal,
            _ => Self::Api,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Auth => "auth",
            Self::Health => "health",
            Self::Internal => "internal",
            Self::Api => "api",
        }
    }

    /// HTTP 메트릭 수집 대상 여부.
    pub fn is_recorded(self) -> bool {
        self != Self::Internal
    }
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(area: RouteArea, method: &str, path: &str) {
    counter!(
        "http_requests_total",
        "area" => area.as_str(),
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(area: RouteArea, method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "area" => area.as_str(),
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(area: RouteArea, method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "area" => area.as_str(),
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// 관리자 라우트 거부(401/403) 카운터 증가.
pub fn record_admin_denied(path: &str, status: u16) {
    counter!(
        "admin_requests_denied_total",
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

// ============================================================================
// 인증 메트릭
// ============================================================================

/// 인증/인가 실패 카운터 증가.
pub fn record_auth_failure(reason: &'static str) {
    counter!("auth_failures_total", "reason" => reason).increment(1);
}

/// 토큰 발급 카운터 증가 (`signup`, `signin`).
pub fn record_token_issued(kind: &'static str) {
    counter!("auth_tokens_issued_total", "kind" => kind).increment(1);
}

// ============================================================================
// 경로 정규화 유틸리티
// ============================================================================

/// 경로의 숫자 ID 세그먼트를 `:id`로 정규화합니다.
///
/// 예: `/todos/12/managers/7` → `/todos/:id/managers/:id`
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
