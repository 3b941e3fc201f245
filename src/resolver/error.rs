//! Resolver Error Types
//!
//! 라우터 에러 정의

use thiserror::Error;

// ============================================================================
// ResolverError - 라우터 에러
// ============================================================================

/// 라우터 에러
///
/// 라우터 자체가 만드는 에러는 설정 에러뿐입니다.
/// 구문 실행 에러는 데이터 접근 계층에서 그대로 전달됩니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// 설정 에러 (치명적)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 알 수 없는 이름 파싱 에러
    #[error("Parse error: unknown {kind} '{value}'")]
    Parse {
        /// 파싱 대상 종류
        kind: &'static str,
        /// 입력값
        value: String,
    },
}

impl ResolverError {
    /// 설정 에러 생성
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 파싱 에러 생성
    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            value: value.into(),
        }
    }

    /// 시작을 중단해야 하는 에러인지 여부
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// 라우터 결과 타입
pub type ResolverResult<T> = Result<T, ResolverError>;

// ============================================================================
// Tests
// ============================================================================
