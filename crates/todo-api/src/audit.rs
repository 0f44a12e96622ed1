//! 관리자 API 접근 감사 로그.
//!
//! 관리자 전용 요청이 인가를 통과하면 호출자 ID, 요청 시각, 요청 URL을
//! [`AuditSink`]로 기록합니다. 기록은 요청 처리 결과에 영향을 주지 않습니다.

use chrono::{DateTime, Utc};

/// 관리자 접근 기록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccess {
    pub user_id: i64,
    pub email: String,
    pub method: String,
    pub url: String,
    pub at: DateTime<Utc>,
}

/// 감사 로그 출력 대상.
///
/// 구현체는 실패를 내부에서 처리해야 하며 호출자에게 전파하지 않습니다.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AdminAccess);
}

/// `admin_access` target으로 tracing 이벤트를 남기는 기본 구현.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AdminAccess) {
        tracing::info!(
            target: "admin_access",
            user_id = entry.user_id,
            email = %entry.email,
            method = %entry.method,
            url = %entry.url,
            at = %entry.at.to_rfc3339(),
            "Admin Access Logged"
        );
    }
}

/// 기록을 메모리에 보관하는 테스트용 구현.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: std::sync::Mutex<Vec<AdminAccess>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 기록된 항목.
    pub fn entries(&self) -> Vec<AdminAccess> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AdminAccess) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}
