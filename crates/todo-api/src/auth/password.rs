//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 호출마다 새로 생성됩니다.
/// 반환값은 알고리즘, 파라미터, 솔트를 포함한 PHC 형식 문자열입니다.
///
/// ```rust,ignore
/// let hash = hash_password("my_secure_password")?;
/// // "$argon2id$v=19$m=19456,t=2,p=1$..."
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 해시 비교는 상수 시간으로 수행됩니다. 해시 형식이 잘못된 경우에도
/// 에러 대신 `false`를 반환합니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("저장된 비밀번호 해시 형식이 올바르지 않습니다");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 새 비밀번호 강도 검증.
///
/// 8자 이상이고 숫자와 대문자를 각각 하나 이상 포함해야 합니다.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_uppercase())
}
