//! 회원가입/로그인 endpoint.
//!
//! 인증 없이 호출할 수 있는 유일한 API입니다.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ApiErrorResponse, ServiceResult};
use crate::state::AppState;

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다."))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해 주세요."))]
    pub password: String,
    /// `USER` 또는 `ADMIN`
    #[validate(length(min = 1, message = "UserRole을 입력해 주세요."))]
    pub user_role: String,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다."))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해 주세요."))]
    pub password: String,
}

/// 토큰 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// `Bearer <jwt>`
    pub bearer_token: String,
}

/// 회원가입.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "가입 성공", body = TokenResponse),
        (status = 400, description = "잘못된 역할 또는 중복 이메일", body = ApiErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> ServiceResult<Json<TokenResponse>> {
    request.validate()?;

    let bearer_token = state
        .auth
        .signup(&request.email, &request.password, &request.user_role)
        .await?;

    Ok(Json(TokenResponse { bearer_token }))
}

/// 로그인.
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "로그인 성공", body = TokenResponse),
        (status = 400, description = "가입되지 않은 유저", body = ApiErrorResponse),
        (status = 401, description = "잘못된 비밀번호", body = ApiErrorResponse)
    )
)]
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SigninRequest>,
) -> ServiceResult<Json<TokenResponse>> {
    request.validate()?;

    let bearer_token = state.auth.signin(&request.email, &request.password).await?;

    Ok(Json(TokenResponse { bearer_token }))
}

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}
