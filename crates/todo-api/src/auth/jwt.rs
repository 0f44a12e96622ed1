//! JWT 토큰 처리.
//!
//! HS256으로 서명된 Access Token 발급/검증. 서명 키는 프로세스 시작 시
//! [`TokenCodec`] 생성자로 한 번 주입되며 이후 변경되지 않습니다.
//!
//! 토큰 갱신, 폐기(블랙리스트), 키 교체는 지원하지 않습니다. 발급된 토큰은
//! 만료 시각까지 유효하며, 재로그인만이 유일한 갱신 방법입니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use todo_core::Role;

/// Authorization 헤더 값의 접두사.
pub const BEARER_PREFIX: &str = "Bearer ";

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    #[serde(rename = "userRole")]
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// `sub`를 숫자 사용자 ID로 해석합니다.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// 주어진 시각 기준 만료 여부.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// 토큰 발급/검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Bearer 접두사가 없는 토큰입니다.")]
    MissingBearerPrefix,
    #[error("만료된 JWT token 입니다.")]
    Expired,
    #[error("유효하지 않는 JWT 서명입니다.")]
    InvalidSignature,
    #[error("잘못된 JWT 토큰입니다.")]
    Malformed,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(String),
}

impl TokenError {
    /// 메트릭 라벨용 짧은 이름.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MissingBearerPrefix => "missing_bearer_prefix",
            TokenError::Expired => "expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Malformed => "malformed",
            TokenError::Encoding(_) => "encoding",
        }
    }
}

/// 토큰 코덱.
///
/// 서명 키와 TTL을 보관하는 불변 값입니다. `Arc`로 공유하여
/// 모든 요청에서 잠금 없이 사용합니다.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// 원시 바이트 키로 코덱 생성.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Self::validation(),
            ttl,
        }
    }

    /// base64 인코딩된 키로 코덱 생성.
    ///
    /// # Errors
    ///
    /// 키가 올바른 base64가 아니면 `TokenError::Encoding`을 반환합니다.
    pub fn from_base64_secret(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        let encoding = EncodingKey::from_base64_secret(secret)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let decoding = DecodingKey::from_base64_secret(secret)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(Self {
            encoding,
            decoding,
            validation: Self::validation(),
            ttl,
        })
    }

    // 만료는 decode_at에서 호출자가 넘긴 시각으로 직접 검사한다.
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }

    /// 토큰 발급.
    ///
    /// `"Bearer " + JWT` 형식의 문자열을 반환합니다.
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(format!("{BEARER_PREFIX}{token}"))
    }

    /// 현재 시각 기준으로 토큰 검증.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// 주어진 시각 기준으로 토큰 검증.
    ///
    /// 검사 순서: 접두사 → 서명/구조 → 만료. 서명이 올바른 토큰이라도
    /// `now > exp`이면 `Expired`입니다.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let raw = token
            .strip_prefix(BEARER_PREFIX)
            .ok_or(TokenError::MissingBearerPrefix)?;

        let data = decode::<Claims>(raw, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
