//! # Todo Core
//!
//! 할일 관리 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자, 역할(Role), 할일, 댓글, 담당자 모델
//! - 영속성 계층 추상화 (store trait)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
