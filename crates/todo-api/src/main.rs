//! Todo API 서버.
//!
//! 설정 로드 → 로깅/메트릭 초기화 → DB 연결 및 마이그레이션 → 라우터 구성 순으로
//! 서버를 시작합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::ExposeSecret;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use todo_api::audit::TracingAuditSink;
use todo_api::auth::TokenCodec;
use todo_api::metrics::setup_metrics_recorder;
use todo_api::middleware::metrics_layer;
use todo_api::openapi::swagger_ui_router;
use todo_api::repository::Database;
use todo_api::routes::create_api_router;
use todo_api::services::WeatherClient;
use todo_api::state::{AppState, Stores};
use todo_core::{init_logging, AppConfig, LogConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    handle_export_openapi()?;

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    info!("Starting Todo API server...");

    let metrics_handle = setup_metrics_recorder().context("메트릭 recorder 설치 실패")?;
    info!("Prometheus metrics recorder initialized");

    let database = Database::connect(&config.database)
        .await
        .context("데이터베이스 연결 실패")?;
    database.migrate().await.context("마이그레이션 실패")?;

    let ttl = chrono::Duration::try_minutes(config.auth.token_ttl_minutes)
        .context("토큰 유효 시간이 범위를 벗어났습니다")?;
    let codec = TokenCodec::from_base64_secret(config.auth.jwt_secret.expose_secret(), ttl)
        .context("JWT 키 설정이 올바르지 않습니다")?;
    info!(ttl_minutes = config.auth.token_ttl_minutes, "Token codec configured");

    let weather = WeatherClient::new(&config.weather).context("날씨 클라이언트 생성 실패")?;

    let pool = database.pool().clone();
    let state = Arc::new(
        AppState::new(
            Stores::postgres(pool.clone()),
            Arc::new(weather),
            Arc::new(codec),
            Arc::new(TracingAuditSink),
        )
        .with_db_pool(pool),
    );

    let app = create_router(
        state,
        metrics_handle,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} 바인딩 실패"))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle, timeout: Duration) -> Router {
    // 메트릭 라우터 (별도 상태)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let api_router = create_api_router(state.clone()).with_state(state);

    Router::new()
        .merge(metrics_router)
        .merge(api_router)
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors_layer())
}

async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// CORS 설정.
///
/// `CORS_ORIGINS`(쉼표 구분)가 없으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
}

/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI=1`이면 OpenAPI JSON을 출력하고 종료.
fn handle_export_openapi() -> anyhow::Result<()> {
    use todo_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        println!("{}", serde_json::to_string_pretty(&ApiDoc::openapi())?);
        std::process::exit(0);
    }

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM을 수신하면 반환합니다. 진행 중인 요청은 끝까지 처리됩니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
