//! Axum용 JWT 인증 추출기 및 관리자 인가 미들웨어.
//!
//! - [`AuthUser`]: 핸들러 인자로 인증된 호출자 정보를 주입합니다.
//! - [`require_admin`]: 관리자 전용 라우트에 `route_layer`로 적용합니다.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/admin/users/{userId}", patch(change_role))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use todo_core::Role;

use super::{Claims, TokenCodec, TokenError};
use crate::audit::AdminAccess;
use crate::error::{AuthFailure, ServiceError};
use crate::state::AppState;

/// 인증된 호출자.
///
/// 토큰에서 한 번 복원된 뒤 하위 계층에서는 다시 파싱하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// 검증된 Claims에서 생성.
    pub fn from_claims(claims: Claims) -> Result<Self, TokenError> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Authorization 헤더를 읽어 토큰을 검증합니다.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<AuthUser, AuthFailure> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthFailure::MissingHeader)?
        .to_str()
        .map_err(|_| AuthFailure::Token(TokenError::Malformed))?;

    codec
        .decode(header)
        .and_then(AuthUser::from_claims)
        .map_err(AuthFailure::Token)
}

/// 관리자 권한 확인.
pub fn require_role(required: Role, user: &AuthUser) -> Result<(), AuthFailure> {
    if required.is_admin() && !user.role.is_admin() {
        return Err(AuthFailure::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // require_admin이 이미 검증한 경우 재사용
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        Ok(authenticate(&parts.headers, &state.codec)?)
    }
}

/// 관리자 전용 라우트 미들웨어.
///
/// 토큰 검증 후 역할이 ADMIN이 아니면 403으로 거절합니다. 통과한 요청은
/// 감사 로그를 남기고 호출자 정보를 request extension에 넣어 핸들러로 전달합니다.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let user = authenticate(request.headers(), &state.codec)?;
    require_role(Role::Admin, &user)?;

    // nest된 라우터에서는 prefix가 제거된 URI가 보이므로 원본 URI를 기록
    let url = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.to_string())
        .unwrap_or_else(|| request.uri().to_string());

    state.audit.record(&AdminAccess {
        user_id: user.id,
        email: user.email.clone(),
        method: request.method().to_string(),
        url,
        at: Utc::now(),
    });

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"middleware-test-secret-0123456789", Duration::minutes(60))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authenticate_valid_token() {
        let codec = codec();
        let token = codec.issue(5, "u@a.com", Role::User, Utc::now()).unwrap();

        let user = authenticate(&headers_with(&token), &codec).unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: 5,
                email: "u@a.com".to_string(),
                role: Role::User,
            }
        );
    }

    #[test]
    fn test_authenticate_missing_header() {
        assert_eq!(
            authenticate(&HeaderMap::new(), &codec()),
            Err(AuthFailure::MissingHeader)
        );
    }

    #[test]
    fn test_authenticate_propagates_token_errors() {
        let codec = codec();
        let expired = codec
            .issue(5, "u@a.com", Role::User, Utc::now() - Duration::hours(3))
            .unwrap();

        assert_eq!(
            authenticate(&headers_with(&expired), &codec),
            Err(AuthFailure::Token(TokenError::Expired))
        );
        assert_eq!(
            authenticate(&headers_with("Token abc"), &codec),
            Err(AuthFailure::Token(TokenError::MissingBearerPrefix))
        );
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser {
            id: 1,
            email: "u@a.com".to_string(),
            role: Role::User,
        };
        let admin = AuthUser {
            role: Role::Admin,
            ..user.clone()
        };

        assert!(require_role(Role::User, &user).is_ok());
        assert_eq!(require_role(Role::Admin, &user), Err(AuthFailure::Forbidden));
        assert!(require_role(Role::Admin, &admin).is_ok());
        assert!(require_role(Role::User, &admin).is_ok());
    }
}
