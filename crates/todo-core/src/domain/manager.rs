//! 할일 담당자.

use serde::{Deserialize, Serialize};

use super::UserSummary;

/// 담당자 레코드. 하나의 할일과 하나의 사용자를 연결합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: i64,
    pub user: UserSummary,
    pub todo_id: i64,
}

/// 새 담당자 입력.
#[derive(Debug, Clone)]
pub struct NewManager {
    pub user_id: i64,
    pub todo_id: i64,
}
