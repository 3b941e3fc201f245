//! 라우팅 모듈
//!
//! 프라이머리/레플리카 간 자동 라우팅을 지원합니다.
//!
//! # 개요
//!
//! 쓰기 구문은 프라이머리로, 잠금 없는 조회는 레플리카로 자동 라우팅됩니다.
//! 레플리카가 여러 개면 [`RoutingPolicy`]에 따라 부하를 분산합니다.
//!
//! # 예시
//!
//! ```ignore
//! use dbresolver::{ActionMode, Router, RouterConfig, RoutingPolicy};
//!
//! let router = Router::register(
//!     RouterConfig::builder()
//!         .with_primary(primary)
//!         .with_replicas(vec![replica_a, replica_b])
//!         .with_policy(RoutingPolicy::RoundRobin)
//!         .build(),
//! )?;
//!
//! // 레플리카로 라우팅
//! router.query_raw("SELECT email FROM users WHERE id = ?", &params!["a"]);
//!
//! // 프라이머리로 라우팅
//! router.execute("DELETE FROM users WHERE id = ?", &params!["a"]);
//!
//! // 모드 고정 (분류기 우회)
//! router.with_mode(ActionMode::Write).query_raw("SELECT 1", &[]);
//! ```

mod events;
mod policy;
mod router;

pub use events::{
    RouteEvent, SourceRole, EVENT_AFTER_SELECT, EVENT_BEFORE_QUERY_RUN, EVENT_BEFORE_SELECT,
};
pub use policy::{Balancer, RandomBalancer, RoundRobinBalancer, RoutingPolicy};
pub use router::{ModeView, RouteHooks, Router, RouterMetrics};
