//! Router Configuration
//!
//! 라우터 설정 및 접근 모드

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{ResolverError, ResolverResult};
use super::routing::{Balancer, RoutingPolicy};

// ============================================================================
// ActionMode - 접근 모드
// ============================================================================

/// 접근 모드
///
/// 호출마다 값으로 전달되며 전역 상태로 공유되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionMode {
    /// 쓰기 (프라이머리)
    Write,
    /// 읽기 (레플리카)
    #[default]
    Read,
}

impl ActionMode {
    /// 모드 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Read => "read",
        }
    }
}

impl FromStr for ActionMode {
    type Err = ResolverError;

    fn from_str(s: &str) -> ResolverResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "write" => Ok(Self::Write),
            "read" => Ok(Self::Read),
            _ => Err(ResolverError::parse("action mode", s)),
        }
    }
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ResolverSettings - 직렬화 가능한 설정
// ============================================================================

/// 설정 파일에서 읽을 수 있는 라우팅 옵션
///
/// ```rust
/// use dbresolver::{ActionMode, ResolverSettings, RoutingPolicy};
///
/// let settings = ResolverSettings::default();
/// assert_eq!(settings.policy, RoutingPolicy::RoundRobin);
/// assert_eq!(settings.default_mode, ActionMode::Read);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// 레플리카 선택 정책
    pub policy: RoutingPolicy,
    /// 구조화 조회의 기본 모드
    pub default_mode: ActionMode,
}

// ============================================================================
// RouterConfig - 라우터 설정
// ============================================================================

/// 라우터 설정
///
/// # 필드
///
/// | 필드 | 기본값 | 설명 |
/// |------|--------|------|
/// | `primary` | 없음 (필수) | 쓰기 가능한 유일한 소스 |
/// | `replicas` | 빈 목록 | 읽기 전용 소스 (순서 유지) |
/// | `policy` | 라운드 로빈 | 레플리카 선택 정책 |
/// | `balancer` | 없음 | 사용자 정의 밸런서 (`policy`보다 우선) |
/// | `default_mode` | `Read` | 구조화 조회의 기본 모드 |
pub struct RouterConfig<S> {
    /// 프라이머리 소스
    pub primary: Option<Arc<S>>,
    /// 레플리카 소스 목록
    pub replicas: Vec<Arc<S>>,
    /// 레플리카 선택 정책
    pub policy: Option<RoutingPolicy>,
    /// 사용자 정의 밸런서
    pub balancer: Option<Arc<dyn Balancer>>,
    /// 기본 접근 모드
    pub default_mode: Option<ActionMode>,
}

impl<S> RouterConfig<S> {
    /// 프라이머리만 지정한 설정
    pub fn new(primary: impl Into<Arc<S>>) -> Self {
        Self {
            primary: Some(primary.into()),
            ..Self::default()
        }
    }

    /// 빌더 시작
    pub fn builder() -> RouterConfigBuilder<S> {
        RouterConfigBuilder::new()
    }
}

impl<S> Default for RouterConfig<S> {
    fn default() -> Self {
        Self {
            primary: None,
            replicas: Vec::new(),
            policy: None,
            balancer: None,
            default_mode: None,
        }
    }
}

impl<S> Clone for RouterConfig<S> {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            replicas: self.replicas.clone(),
            policy: self.policy,
            balancer: self.balancer.clone(),
            default_mode: self.default_mode,
        }
    }
}

impl<S> fmt::Debug for RouterConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("has_primary", &self.primary.is_some())
            .field("replicas", &self.replicas.len())
            .field("policy", &self.policy)
            .field("balancer", &self.balancer)
            .field("default_mode", &self.default_mode)
            .finish()
    }
}

/// 라우터 설정 빌더
pub struct RouterConfigBuilder<S> {
    config: RouterConfig<S>,
}

impl<S> RouterConfigBuilder<S> {
    /// 새 빌더 생성
    pub fn new() -> Self {
        Self {
            config: RouterConfig::default(),
        }
    }

    /// 프라이머리 설정
    pub fn with_primary(mut self, primary: impl Into<Arc<S>>) -> Self {
        self.config.primary = Some(primary.into());
        self
    }

    /// 레플리카 추가
    pub fn with_replica(mut self, replica: impl Into<Arc<S>>) -> Self {
        self.config.replicas.push(replica.into());
        self
    }

    /// 레플리카 목록 설정
    pub fn with_replicas<I, R>(mut self, replicas: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<S>>,
    {
        self.config.replicas = replicas.into_iter().map(Into::into).collect();
        self
    }

    /// 라우팅 정책 설정
    pub fn with_policy(mut self, policy: RoutingPolicy) -> Self {
        self.config.policy = Some(policy);
        self
    }

    /// 사용자 정의 밸런서 설정
    pub fn with_balancer(mut self, balancer: Arc<dyn Balancer>) -> Self {
        self.config.balancer = Some(balancer);
        self
    }

    /// 기본 접근 모드 설정
    pub fn with_default_mode(mut self, mode: ActionMode) -> Self {
        self.config.default_mode = Some(mode);
        self
    }

    /// 직렬화된 설정 적용
    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.config.policy = Some(settings.policy);
        self.config.default_mode = Some(settings.default_mode);
        self
    }

    /// 설정 빌드
    pub fn build(self) -> RouterConfig<S> {
        self.config
    }
}

impl<S> Default for RouterConfigBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mode_default() {
        assert_eq!(ActionMode::default(), ActionMode::Read);
    }

    #[test]
    fn test_action_mode_parse() {
        assert_eq!("WRITE".parse::<ActionMode>().unwrap(), ActionMode::Write);
        assert_eq!(" read ".parse::<ActionMode>().unwrap(), ActionMode::Read);
        assert!("both".parse::<ActionMode>().is_err());
        assert_eq!(ActionMode::Write.to_string(), "write");
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::<String>::builder()
            .with_primary("primary".to_string())
            .with_replica("replica-a".to_string())
            .with_replica("replica-b".to_string())
            .with_policy(RoutingPolicy::Random)
            .with_default_mode(ActionMode::Write)
            .build();

        assert_eq!(config.primary.as_deref().map(String::as_str), Some("primary"));
        assert_eq!(config.replicas.len(), 2);
        assert_eq!(config.policy, Some(RoutingPolicy::Random));
        assert_eq!(config.default_mode, Some(ActionMode::Write));
    }

    #[test]
    fn test_builder_with_replicas_replaces() {
        let config = RouterConfig::<String>::builder()
            .with_replica("old".to_string())
            .with_replicas(vec!["a".to_string(), "b".to_string()])
            .build();

        let names: Vec<&str> = config.replicas.iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(config.primary.is_none());
    }

    #[test]
    fn test_settings_deserialize() {
        let settings: ResolverSettings =
            serde_json::from_str(r#"{"policy": "random", "default_mode": "write"}"#).unwrap();
        assert_eq!(settings.policy, RoutingPolicy::Random);
        assert_eq!(settings.default_mode, ActionMode::Write);
    }

    #[test]
    fn test_settings_defaults_and_unknown_policy() {
        let settings: ResolverSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ResolverSettings::default());

        let settings: ResolverSettings =
            serde_json::from_str(r#"{"policy": "weighted"}"#).unwrap();
        assert_eq!(settings.policy, RoutingPolicy::Unrecognized);
        assert_eq!(settings.default_mode, ActionMode::Read);
    }

    #[test]
    fn test_with_settings() {
        let settings = ResolverSettings {
            policy: RoutingPolicy::Random,
            default_mode: ActionMode::Write,
        };
        let config = RouterConfig::<String>::builder()
            .with_settings(settings)
            .build();
        assert_eq!(config.policy, Some(RoutingPolicy::Random));
        assert_eq!(config.default_mode, Some(ActionMode::Write));
    }
}
