//! 할일 댓글.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// 댓글 레코드 (작성자 정보 포함).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
    pub todo_id: i64,
    pub created_at: DateTime<Utc>,
}

/// 새 댓글 입력.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
}
