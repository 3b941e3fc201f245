//! 라우팅 정책
//!
//! 레플리카 선택 전략을 정의합니다.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::super::error::{ResolverError, ResolverResult};

/// 라우팅 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
    /// 라운드 로빈 (기본값)
    #[default]
    #[serde(alias = "roundrobin", alias = "round-robin")]
    RoundRobin,
    /// 랜덤
    Random,
    /// 알 수 없는 정책 이름 (라운드 로빈으로 처리)
    #[serde(other)]
    Unrecognized,
}

impl RoutingPolicy {
    /// 이름에서 정책 파싱. 알 수 없는 이름은 `Unrecognized`
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unrecognized)
    }

    /// 정책 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::Random => "random",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// 레플리카 수에 맞는 밸런서 생성
    ///
    /// 명시된 정책은 그대로 따르고, 알 수 없는 정책은 라운드 로빈으로 대체합니다.
    pub fn build(self, resource_count: usize) -> Arc<dyn Balancer> {
        match self {
            Self::Random => Arc::new(RandomBalancer::new(resource_count)),
            Self::RoundRobin | Self::Unrecognized => {
                Arc::new(RoundRobinBalancer::new(resource_count))
            }
        }
    }
}

impl FromStr for RoutingPolicy {
    type Err = ResolverError;

    fn from_str(s: &str) -> ResolverResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "round_robin" | "roundrobin" | "round-robin" => Ok(Self::RoundRobin),
            "random" => Ok(Self::Random),
            _ => Err(ResolverError::parse("policy", s)),
        }
    }
}

impl fmt::Display for RoutingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Balancer - 밸런서
// ============================================================================

/// 레플리카 인덱스를 고르는 밸런서
///
/// 외부 동기화 없이 여러 스레드에서 동시에 호출할 수 있어야 합니다.
/// `resource_count() > 0`이면 `next()`는 `[0, resource_count)` 범위를 반환하고,
/// 0이면 반환값은 의미가 없으며 호출자는 레플리카가 없다고 간주해야 합니다.
pub trait Balancer: Send + Sync + fmt::Debug {
    /// 다음 인덱스
    fn next(&self) -> usize;

    /// 대상 리소스 수
    fn resource_count(&self) -> usize;

    /// 정책 이름
    fn name(&self) -> &str;

    /// 내부 상태 리셋
    fn reset(&self) {}
}

/// 라운드 로빈 밸런서
#[derive(Debug)]
pub struct RoundRobinBalancer {
    /// 리소스 수
    resource_count: usize,
    /// 다음에 반환할 인덱스
    counter: AtomicUsize,
}

impl RoundRobinBalancer {
    /// 새 밸런서 생성
    pub fn new(resource_count: usize) -> Self {
        Self {
            resource_count,
            counter: AtomicUsize::new(0),
        }
    }
}

impl Balancer for RoundRobinBalancer {
    fn next(&self) -> usize {
        let count = self.resource_count;
        // 읽기와 전진이 하나의 CAS 루프 안에서 일어나므로 갱신이 유실되지 않음
        let advanced = self
            .counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(if current + 1 < count { current + 1 } else { 0 })
            });

        match advanced {
            Ok(previous) | Err(previous) => previous,
        }
    }

    fn resource_count(&self) -> usize {
        self.resource_count
    }

    fn name(&self) -> &str {
        RoutingPolicy::RoundRobin.as_str()
    }

    fn reset(&self) {
        self.counter.store(0, Ordering::Release);
    }
}

/// 랜덤 밸런서
///
/// 난수 생성기는 생성 시 한 번만 시드되고 인스턴스가 소유합니다.
pub struct RandomBalancer {
    /// 리소스 수
    resource_count: usize,
    /// 난수 생성기
    rng: Mutex<StdRng>,
}

impl RandomBalancer {
    /// 운영체제 엔트로피로 시드한 밸런서 생성
    pub fn new(resource_count: usize) -> Self {
        Self {
            resource_count,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 고정 시드로 밸런서 생성
    pub fn with_seed(resource_count: usize, seed: u64) -> Self {
        Self {
            resource_count,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Balancer for RandomBalancer {
    fn next(&self) -> usize {
        if self.resource_count == 0 {
            return 0;
        }

        self.rng.lock().gen_range(0..self.resource_count)
    }

    fn resource_count(&self) -> usize {
        self.resource_count
    }

    fn name(&self) -> &str {
        RoutingPolicy::Random.as_str()
    }
}

impl fmt::Debug for RandomBalancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomBalancer")
            .field("resource_count", &self.resource_count)
            .finish()
    }
}
