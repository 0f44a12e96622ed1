//! 영속성 계층 추상화.
//!
//! 서비스 계층은 이 trait들만 알고, 실제 구현(PostgreSQL, 메모리)은
//! 애플리케이션 시작 시 주입됩니다.
//!
//! # 구현 예시
//!
//! ```ignore
//! pub struct PgUserRepository {
//!     pool: PgPool,
//! }
//!
//! #[async_trait]
//! impl UserStore for PgUserRepository {
//!     async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
//!         // SELECT EXISTS(...)
//!     }
//!
//!     // ... 나머지 메서드 구현
//! }
//! ```

use async_trait::async_trait;

use super::{
    Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Role, Todo, User,
};
use crate::error::StoreResult;

/// 사용자 저장소.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일 사용 여부.
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool>;

    /// 이메일로 사용자 조회.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// 사용자 저장. 저장소가 ID를 부여합니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict`: 이메일이 이미 존재하는 경우
    async fn save(&self, user: NewUser) -> StoreResult<User>;

    /// 비밀번호 해시 변경.
    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()>;

    /// 역할 변경.
    async fn update_role(&self, id: i64, role: Role) -> StoreResult<()>;
}

/// 할일 저장소.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// 할일 저장.
    ///
    /// 작성자를 첫 번째 담당자로 함께 등록하며, 두 작업은 하나의 단위로 처리됩니다.
    async fn save(&self, todo: NewTodo) -> StoreResult<Todo>;

    /// ID로 할일 조회 (작성자 포함).
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>>;

    /// 수정 시각 내림차순 페이지 조회.
    ///
    /// `offset`/`limit`은 0부터 시작하는 행 기준이며, 전체 개수를 함께 반환합니다.
    async fn find_page(&self, offset: i64, limit: i64) -> StoreResult<(Vec<Todo>, i64)>;
}

/// 댓글 저장소.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// 댓글 저장.
    async fn save(&self, comment: NewComment) -> StoreResult<Comment>;

    /// 할일의 댓글 목록 (작성자 포함).
    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Comment>>;

    /// 댓글 삭제. 삭제된 행이 있으면 true.
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;
}

/// 담당자 저장소.
#[async_trait]
pub trait ManagerStore: Send + Sync {
    /// 담당자 저장.
    async fn save(&self, manager: NewManager) -> StoreResult<Manager>;

    /// 할일의 담당자 목록 (사용자 포함).
    async fn find_by_todo_id(&self, todo_id: i64) -> StoreResult<Vec<Manager>>;

    /// ID로 담당자 조회.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Manager>>;

    /// 담당자 삭제. 삭제된 행이 있으면 true.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}
