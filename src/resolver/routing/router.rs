//! 라우터
//!
//! 프라이머리 하나와 레플리카 목록 사이에서 호출마다 소스를 선택합니다.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::classifier::is_mutating;
use super::super::config::{ActionMode, RouterConfig};
use super::super::error::{ResolverError, ResolverResult};
use super::super::source::DataSource;
use super::super::types::Value;
use super::events::{RouteEvent, SourceRole};
use super::policy::Balancer;
use crate::hooks::EventStore;

/// 라우터 이벤트 저장소
pub type RouteHooks<S> = EventStore<RouteEvent<S>>;

/// 라우터
///
/// - 원시 구문(`execute`, `query_raw`)은 분류기 판정에 따라 라우팅됩니다.
/// - 구조화 조회(`filter`, `find`, ...)는 기본 모드를 따릅니다.
/// - `save`는 항상 프라이머리로 갑니다.
/// - [`Router::with_mode`]는 분류기를 거치지 않고 모드를 고정한 뷰를 돌려줍니다.
///
/// 레플리카 목록은 생성 후 바뀌지 않습니다. 구성을 바꾸려면 라우터를 새로 등록합니다.
pub struct Router<S> {
    /// 프라이머리 소스
    primary: Arc<S>,
    /// 레플리카 소스 목록
    replicas: Vec<Arc<S>>,
    /// 레플리카 밸런서
    balancer: Arc<dyn Balancer>,
    /// 구조화 조회의 기본 모드
    default_mode: ActionMode,
    /// 이벤트 훅
    hooks: Arc<RouteHooks<S>>,
    /// 선택 카운터
    counters: Arc<SelectionCounters>,
}

impl<S: DataSource> Router<S> {
    /// 설정으로 라우터 등록
    ///
    /// 프라이머리가 없으면 [`ResolverError::Configuration`]을 반환합니다.
    /// 이 에러는 치명적이며 호출자는 시작을 중단해야 합니다.
    pub fn register(config: RouterConfig<S>) -> ResolverResult<Self> {
        let RouterConfig {
            primary,
            replicas,
            policy,
            balancer,
            default_mode,
        } = config;

        let primary = match primary {
            Some(primary) => primary,
            None => {
                tracing::error!("router registration refused: primary source is required");
                return Err(ResolverError::configuration("primary source is required"));
            }
        };

        let balancer = match balancer {
            Some(custom) => {
                if custom.resource_count() != replicas.len() {
                    tracing::warn!(
                        balancer = custom.name(),
                        resource_count = custom.resource_count(),
                        replicas = replicas.len(),
                        "custom balancer is not sized to the replica count"
                    );
                }
                custom
            }
            None => policy.unwrap_or_default().build(replicas.len()),
        };

        let default_mode = default_mode.unwrap_or_default();

        tracing::debug!(
            replicas = replicas.len(),
            policy = balancer.name(),
            default_mode = %default_mode,
            "router registered"
        );

        Ok(Self {
            primary,
            replicas,
            balancer,
            default_mode,
            hooks: Arc::new(EventStore::new()),
            counters: Arc::new(SelectionCounters::default()),
        })
    }

    /// 외부에서 만든 훅 저장소 사용
    pub fn with_hooks(mut self, hooks: Arc<RouteHooks<S>>) -> Self {
        self.hooks = hooks;
        self
    }

    /// 모드를 고정한 뷰
    pub fn with_mode(&self, mode: ActionMode) -> ModeView<'_, S> {
        ModeView { router: self, mode }
    }

    /// 기본 모드에 따른 소스 선택
    pub fn select_source(&self) -> Arc<S> {
        self.select_for(self.default_mode)
    }

    /// 레플리카 선택
    ///
    /// 레플리카가 없거나 밸런서 인덱스가 범위를 벗어나면 프라이머리를 돌려줍니다.
    pub fn replica(&self) -> Arc<S> {
        let next = self.balancer.next();

        let (source, index) = match self.replicas.get(next) {
            Some(replica) => {
                self.counters.replica.fetch_add(1, Ordering::Relaxed);
                (Arc::clone(replica), next)
            }
            None => {
                if self.replicas.is_empty() {
                    tracing::debug!("no replicas configured, reading from primary");
                } else {
                    tracing::warn!(
                        index = next,
                        replicas = self.replicas.len(),
                        "balancer index out of range, reading from primary"
                    );
                }
                self.counters.fallback.fetch_add(1, Ordering::Relaxed);
                (Arc::clone(&self.primary), 0)
            }
        };

        tracing::trace!(role = "replica", index, "source selected");
        self.emit(RouteEvent::AfterSelect {
            role: SourceRole::Replica,
            source: Arc::clone(&source),
            index,
        });

        source
    }

    /// 프라이머리 선택
    pub fn master(&self) -> Arc<S> {
        self.counters.primary.fetch_add(1, Ordering::Relaxed);

        tracing::trace!(role = "master", index = 0, "source selected");
        self.emit(RouteEvent::AfterSelect {
            role: SourceRole::Master,
            source: Arc::clone(&self.primary),
            index: 0,
        });

        Arc::clone(&self.primary)
    }

    /// 원시 구문 실행
    pub fn execute(&self, sql: &str, params: &[Value]) -> S::Output {
        self.route_statement(sql, params).execute(sql, params)
    }

    /// 원시 조회
    pub fn query_raw(&self, sql: &str, params: &[Value]) -> S::Output {
        self.route_statement(sql, params).query_raw(sql, params)
    }

    /// 조건 절 (SQL `WHERE`)
    pub fn filter(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().filter(condition, params)
    }

    /// 조건에 맞는 모든 행
    pub fn find(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().find(condition, params)
    }

    /// 첫 행
    pub fn first(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().first(condition, params)
    }

    /// 마지막 행
    pub fn last(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().last(condition, params)
    }

    /// 임의의 한 행
    pub fn take(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().take(condition, params)
    }

    /// 행 개수
    pub fn count(&self, condition: &str, params: &[Value]) -> S::Output {
        self.select_source().count(condition, params)
    }

    /// 모델 저장 (항상 프라이머리)
    pub fn save(&self, model: &S::Model) -> S::Output {
        self.master().save(model)
    }

    /// 라우터가 따로 다루지 않는 호출을 프라이머리에 전달
    pub fn delegate<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.master().as_ref())
    }

    /// 이벤트 훅
    pub fn hooks(&self) -> &RouteHooks<S> {
        &self.hooks
    }

    /// 프라이머리 소스 (이벤트 없음)
    pub fn primary(&self) -> &Arc<S> {
        &self.primary
    }

    /// 레플리카 목록
    pub fn replicas(&self) -> &[Arc<S>] {
        &self.replicas
    }

    /// 기본 모드
    pub fn default_mode(&self) -> ActionMode {
        self.default_mode
    }

    /// 밸런서 정책 이름
    pub fn policy(&self) -> &str {
        self.balancer.name()
    }

    /// 라우터 메트릭
    pub fn metrics(&self) -> RouterMetrics {
        RouterMetrics {
            primary_selections: self.counters.primary.load(Ordering::Relaxed),
            replica_selections: self.counters.replica.load(Ordering::Relaxed),
            replica_fallbacks: self.counters.fallback.load(Ordering::Relaxed),
            replica_count: self.replicas.len(),
        }
    }

    /// 모드에 따른 소스 선택
    fn select_for(&self, mode: ActionMode) -> Arc<S> {
        self.emit(RouteEvent::BeforeSelect { mode });

        match mode {
            ActionMode::Write => self.master(),
            ActionMode::Read => self.replica(),
        }
    }

    /// 분류기로 원시 구문의 대상 선택
    fn route_statement(&self, sql: &str, params: &[Value]) -> Arc<S> {
        if !is_mutating(sql) {
            return self.replica();
        }

        let master = self.master();
        self.emit(RouteEvent::BeforeQueryRun {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        master
    }

    fn emit(&self, event: RouteEvent<S>) {
        let result = self.hooks.emit(event.name(), &event);
        if let Some(err) = result.error {
            tracing::trace!(event = event.name(), error = %err, "route hook returned error");
        }
    }
}

impl<S> fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("replicas", &self.replicas.len())
            .field("balancer", &self.balancer)
            .field("default_mode", &self.default_mode)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

// ============================================================================
// ModeView - 모드 고정 뷰
// ============================================================================

/// 모드가 고정된 라우팅 뷰
///
/// 원시 구문과 구조화 조회 모두 고정된 모드로 소스를 고릅니다.
pub struct ModeView<'a, S> {
    router: &'a Router<S>,
    mode: ActionMode,
}

impl<'a, S: DataSource> ModeView<'a, S> {
    /// 고정된 모드
    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    /// 고정된 모드로 소스 선택
    pub fn source(&self) -> Arc<S> {
        self.router.select_for(self.mode)
    }

    /// 원시 구문 실행
    pub fn execute(&self, sql: &str, params: &[Value]) -> S::Output {
        self.source().execute(sql, params)
    }

    /// 원시 조회
    pub fn query_raw(&self, sql: &str, params: &[Value]) -> S::Output {
        self.source().query_raw(sql, params)
    }

    /// 조건 절 (SQL `WHERE`)
    pub fn filter(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().filter(condition, params)
    }

    /// 조건에 맞는 모든 행
    pub fn find(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().find(condition, params)
    }

    /// 첫 행
    pub fn first(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().first(condition, params)
    }

    /// 마지막 행
    pub fn last(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().last(condition, params)
    }

    /// 임의의 한 행
    pub fn take(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().take(condition, params)
    }

    /// 행 개수
    pub fn count(&self, condition: &str, params: &[Value]) -> S::Output {
        self.source().count(condition, params)
    }

    /// 모델 저장 (모드와 무관하게 프라이머리)
    pub fn save(&self, model: &S::Model) -> S::Output {
        self.router.save(model)
    }
}

impl<S> fmt::Debug for ModeView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeView").field("mode", &self.mode).finish()
    }
}

// ============================================================================
// RouterMetrics - 라우터 메트릭
// ============================================================================

#[derive(Debug, Default)]
struct SelectionCounters {
    primary: AtomicU64,
    replica: AtomicU64,
    fallback: AtomicU64,
}

/// 라우터 메트릭
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterMetrics {
    /// 프라이머리 선택 수
    pub primary_selections: u64,
    /// 레플리카 선택 수
    pub replica_selections: u64,
    /// 레플리카 대신 프라이머리로 대체된 수
    pub replica_fallbacks: u64,
    /// 레플리카 수
    pub replica_count: usize,
}
