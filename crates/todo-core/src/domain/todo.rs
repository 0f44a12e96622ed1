//! 할일(일정).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// 할일 레코드 (작성자 정보 포함).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,
    /// 작성 당일의 날씨
    pub weather: String,
    /// 작성자
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// 새 할일 입력.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    /// 작성자 ID. 저장 시 작성자가 첫 담당자로 함께 등록됩니다.
    pub user_id: i64,
}

/// 할일 목록 페이지 (1부터 시작).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TodoPage {
    pub content: Vec<Todo>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl TodoPage {
    /// 전체 개수로부터 페이지 정보 계산.
    pub fn new(content: Vec<Todo>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(TodoPage::new(vec![], 1, 10, 0).total_pages, 0);
        assert_eq!(TodoPage::new(vec![], 1, 10, 10).total_pages, 1);
        assert_eq!(TodoPage::new(vec![], 1, 10, 11).total_pages, 2);
        assert_eq!(TodoPage::new(vec![], 3, 5, 21).total_pages, 5);
    }

    #[test]
    fn test_todo_page_camel_case() {
        let page = TodoPage::new(vec![], 1, 10, 3);
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains(r#""totalElements":3"#));
        assert!(json.contains(r#""totalPages":1"#));
    }
}
