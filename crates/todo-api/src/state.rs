//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 요청 경로에서 변경되는 값은 없습니다. 토큰 코덱(서명 키 + TTL), 무상태
//! 서비스, 연결 풀만 `Arc`로 공유합니다.

use std::sync::Arc;

use todo_core::{CommentStore, ManagerStore, TodoStore, UserStore};

use crate::audit::AuditSink;
use crate::auth::{AuthService, TokenCodec};
use crate::repository::{
    PgCommentRepository, PgManagerRepository, PgTodoRepository, PgUserRepository,
};
use crate::services::{CommentService, ManagerService, TodoService, UserService, WeatherProvider};

/// store 구현 묶음.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub todos: Arc<dyn TodoStore>,
    pub comments: Arc<dyn CommentStore>,
    pub managers: Arc<dyn ManagerStore>,
}

impl Stores {
    /// PostgreSQL 저장소.
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            todos: Arc::new(PgTodoRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            managers: Arc::new(PgManagerRepository::new(pool)),
        }
    }
}

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 회원가입/로그인
    pub auth: AuthService,
    pub todos: TodoService,
    pub comments: CommentService,
    pub managers: ManagerService,
    pub users: UserService,

    /// 토큰 코덱 - 요청 인증에 사용
    pub codec: Arc<TokenCodec>,

    /// 관리자 접근 감사 로그
    pub audit: Arc<dyn AuditSink>,

    /// 데이터베이스 연결 풀 (readiness 확인용)
    pub db_pool: Option<sqlx::PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(
        stores: Stores,
        weather: Arc<dyn WeatherProvider>,
        codec: Arc<TokenCodec>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            auth: AuthService::new(stores.users.clone(), codec.clone()),
            todos: TodoService::new(stores.todos.clone(), weather),
            comments: CommentService::new(stores.comments.clone(), stores.todos.clone()),
            managers: ManagerService::new(
                stores.managers.clone(),
                stores.todos.clone(),
                stores.users.clone(),
            ),
            users: UserService::new(stores.users),
            codec,
            audit,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 설정.
    pub fn with_db_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => crate::repository::health_check(pool).await.is_ok(),
            None => false,
        }
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// DB 없이 메모리 store, 고정 날씨("Sunny"), tracing 감사 로그로 구성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::audit::TracingAuditSink;
    use crate::repository::MemoryStore;
    use crate::services::FixedWeather;

    let store = Arc::new(MemoryStore::new());
    let stores = Stores {
        users: store.clone(),
        todos: store.clone(),
        comments: store.clone(),
        managers: store,
    };
    let codec = Arc::new(TokenCodec::new(
        b"test-state-secret-key-minimum-32-chars",
        chrono::Duration::minutes(60),
    ));

    AppState::new(
        stores,
        Arc::new(FixedWeather("Sunny".to_string())),
        codec,
        Arc::new(TracingAuditSink),
    )
}
