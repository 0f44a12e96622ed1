//! 사용자 및 역할.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 와이어 형식과 DB 저장 형식 모두 대문자 문자열(`USER`, `ADMIN`)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 일반 사용자
    User,
    /// 관리자 - 관리자 전용 API 접근 가능
    Admin,
}

impl Role {
    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// DB/와이어 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// 문자열에서 역할 파싱.
    ///
    /// 정확히 `USER` 또는 `ADMIN`만 허용합니다. 대소문자 변환이나 공백 제거는 하지 않습니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 저장된 사용자 레코드.
///
/// 비밀번호는 해시로만 보관하며 직렬화하지 않습니다.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl User {
    /// 응답용 요약 정보.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// 새 사용자 입력 (id는 store가 부여).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// 응답에 포함되는 사용자 요약 (`{id, email}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_exact_match() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));

        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("User"), None);
        assert_eq!(Role::parse(" ADMIN"), None);
        assert_eq!(Role::parse("ADMIN "), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");

        let parsed: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(parsed, Role::User);

        assert!(serde_json::from_str::<Role>("\"user\"").is_err());
    }

    #[test]
    fn test_role_display_matches_wire_format() {
        assert_eq!(Role::User.to_string(), "USER");
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
