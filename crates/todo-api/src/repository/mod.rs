//! Repository pattern for database operations.
//!
//! `todo_core`의 store trait을 PostgreSQL로 구현합니다. 서비스 계층은
//! `Arc<dyn ...Store>`만 보고 동작하므로 테스트에서는 [`MemoryStore`]로
//! 대체할 수 있습니다.

pub mod comments;
pub mod managers;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod todos;
pub mod users;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use todo_core::{DatabaseConfig, StoreError, StoreResult};
use tracing::info;

pub use comments::PgCommentRepository;
pub use managers::PgManagerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use todos::PgTodoRepository;
pub use users::PgUserRepository;

/// PostgreSQL 연결 풀.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 연결 풀을 생성합니다.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        info!("Database connection established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> StoreResult<()> {
        info!("Running database migrations...");

        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        info!("Migrations completed successfully");
        Ok(())
    }
}

/// 데이터베이스 상태를 확인합니다.
pub async fn health_check(pool: &PgPool) -> StoreResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
