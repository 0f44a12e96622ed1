//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`hash_password`] / [`verify_password`]: Argon2 비밀번호 해싱
//! - [`TokenCodec`]: HS256 JWT 발급/검증
//! - [`AuthService`]: 회원가입/로그인
//! - [`AuthUser`], [`require_admin`]: 요청 인증 추출기와 관리자 인가 미들웨어
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(user: AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

mod jwt;
mod middleware;
mod password;
mod service;

pub use jwt::{Claims, TokenCodec, TokenError, BEARER_PREFIX};
pub use middleware::{authenticate, require_admin, require_role, AuthUser};
pub use password::{hash_password, is_strong_password, verify_password, PasswordError};
pub use service::AuthService;
