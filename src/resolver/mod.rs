//! Resolver Module
//!
//! 구문 단위 프라이머리/레플리카 선택
//!
//! # 구성
//!
//! - 구문 분류기 (`classify`, `is_mutating`)
//! - 라우팅 정책 (`Balancer`, `RoundRobinBalancer`, `RandomBalancer`)
//! - 라우터 (`Router`, `ModeView`)
//! - 설정 (`RouterConfig`, `ResolverSettings`)
//!
//! 연결 생성, 풀링, 실행, 트랜잭션은 [`DataSource`] 구현체(데이터 접근 계층)의 몫입니다.

pub mod routing;
mod classifier;
mod config;
mod error;
mod source;
mod types;

// Re-exports
pub use classifier::{classify, is_mutating, StatementKind};
pub use config::{ActionMode, ResolverSettings, RouterConfig, RouterConfigBuilder};
pub use error::{ResolverError, ResolverResult};
pub use source::DataSource;
pub use types::Value;

/// 파라미터 목록 생성 매크로
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}
