//! 영속성 계층 에러 타입.

use thiserror::Error;

/// store 작업 중 발생하는 에러.
///
/// 서비스 계층에서는 복구하지 않고 그대로 요청 실패(500)로 전파합니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 유니크 제약 조건 위반
    #[error("중복된 값: {0}")]
    Conflict(String),

    /// 저장된 값을 도메인 타입으로 변환하지 못함
    #[error("잘못된 저장 데이터: {0}")]
    Corrupted(String),
}

/// store 작업을 위한 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "데이터베이스 에러: connection refused");

        let err = StoreError::Corrupted("role=ROOT".to_string());
        assert!(err.to_string().contains("role=ROOT"));
    }
}
