//! HTTP 요청 metrics middleware.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{
    normalize_path, record_admin_denied, record_http_duration, record_http_request,
    record_http_response, RouteArea,
};

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// 모든 지표에 `area` 라벨(`admin`, `auth`, `health`, `api`)이 붙습니다.
/// `/metrics`와 API 문서 경로는 수집하지 않습니다.
///
/// - `http_requests_total`: 총 요청 수
/// - `http_responses_total`: 총 응답 수 (status 라벨 추가)
/// - `http_request_duration_seconds`: 요청 처리 시간 히스토그램
/// - `admin_requests_denied_total`: 관리자 라우트에서 401/403으로 끝난 요청 수
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let area = RouteArea::of(request.uri().path());
    if !area.is_recorded() {
        return next.run(request).await;
    }

    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    record_http_request(area, &method, &path);

    let response = next.run(request).await;
    let status = response.status();

    record_http_response(area, &method, &path, status.as_u16());
    record_http_duration(area, &method, &path, start.elapsed().as_secs_f64());

    if is_admin_denial(area, status) {
        record_admin_denied(&path, status.as_u16());
    }

    response
}

fn is_admin_denial(area: RouteArea, status: StatusCode) -> bool {
    area == RouteArea::Admin
        && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}
