//! 사용자 조회, 비밀번호 변경, 관리자 역할 변경.

use std::sync::Arc;

use todo_core::{Role, UserStore, UserSummary};

use crate::auth::{hash_password, is_strong_password, verify_password, AuthUser};
use crate::error::{Entity, InvalidRequest, ServiceResult};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get(&self, user_id: i64) -> ServiceResult<UserSummary> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::User))?;

        Ok(user.summary())
    }

    /// 비밀번호 변경.
    ///
    /// 새 비밀번호 강도 → 사용자 존재 → 기존과 동일 여부 → 기존 비밀번호 일치 순으로 검사합니다.
    pub async fn change_password(
        &self,
        caller: &AuthUser,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        if !is_strong_password(new_password) {
            return Err(InvalidRequest::WeakPassword.into());
        }

        let user = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::User))?;

        if verify_password(new_password, &user.password_hash) {
            return Err(InvalidRequest::SamePassword.into());
        }

        if !verify_password(old_password, &user.password_hash) {
            return Err(InvalidRequest::WrongPassword.into());
        }

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        tracing::info!(user_id = user.id, "비밀번호 변경");
        Ok(())
    }

    /// 관리자 역할 변경. 역할 문자열은 회원가입과 같은 규칙으로 검사합니다.
    pub async fn change_role(&self, user_id: i64, role: &str) -> ServiceResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(InvalidRequest::NotFound(Entity::User))?;

        let role = Role::parse(role).ok_or(InvalidRequest::BadRole)?;
        self.users.update_role(user.id, role).await?;

        tracing::info!(user_id = user.id, role = %role, "역할 변경");
        Ok(())
    }
}
