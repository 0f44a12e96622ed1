//! 회원가입/로그인.

use std::sync::Arc;

use chrono::Utc;
use todo_core::{NewUser, Role, StoreError, UserStore};

use super::{hash_password, verify_password, TokenCodec};
use crate::error::{AuthFailure, InvalidRequest, ServiceError, ServiceResult};
use crate::metrics::record_token_issued;

/// 인증 서비스.
///
/// 요청마다 독립적으로 동작하며 내부 상태를 갖지 않습니다.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self { users, codec }
    }

    /// 회원가입 후 Bearer 토큰을 반환합니다.
    ///
    /// 1. 이메일 중복 확인
    /// 2. 역할 문자열 검증 (`USER`/`ADMIN` 정확히 일치)
    /// 3. 비밀번호 해싱 후 저장
    /// 4. 토큰 발급
    pub async fn signup(&self, email: &str, password: &str, role: &str) -> ServiceResult<String> {
        if self.users.exists_by_email(email).await? {
            return Err(InvalidRequest::DuplicateEmail.into());
        }

        let role = Role::parse(role).ok_or(InvalidRequest::BadRole)?;

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .save(NewUser {
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                // 동시 가입으로 유니크 제약에 걸린 경우
                StoreError::Conflict(_) => ServiceError::from(InvalidRequest::DuplicateEmail),
                other => other.into(),
            })?;

        tracing::info!(user_id = user.id, role = %user.role, "회원가입 완료");

        let token = self
            .codec
            .issue(user.id, &user.email, user.role, Utc::now())?;
        record_token_issued("signup");
        Ok(token)
    }

    /// 로그인 후 Bearer 토큰을 반환합니다.
    pub async fn signin(&self, email: &str, password: &str) -> ServiceResult<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(InvalidRequest::UserNotFound)?;

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "비밀번호 불일치");
            return Err(AuthFailure::BadCredentials.into());
        }

        let token = self
            .codec
            .issue(user.id, &user.email, user.role, Utc::now())?;
        record_token_issued("signin");
        Ok(token)
    }
}
