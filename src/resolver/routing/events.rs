//! 라우팅 이벤트
//!
//! 라우터가 선택 전후와 쓰기 구문 실행 직전에 발행하는 이벤트입니다.

use std::fmt;
use std::sync::Arc;

use super::super::config::ActionMode;
use super::super::types::Value;

/// 소스 선택 직전 (결정된 모드 전달)
pub const EVENT_BEFORE_SELECT: &str = "before::select_db";

/// 소스 선택 직후 (역할, 소스, 인덱스 전달)
///
/// 다른 이벤트 이름과 같은 `phase::subject` 형식입니다. 콜론 하나짜리
/// `after:select_db`로 등록한 핸들러는 호출되지 않으므로 이 상수를 사용하세요.
pub const EVENT_AFTER_SELECT: &str = "after::select_db";

/// 쓰기 구문이 프라이머리에 전달되기 직전 (구문, 파라미터 전달)
pub const EVENT_BEFORE_QUERY_RUN: &str = "before::query_run";

/// 선택된 소스의 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRole {
    /// 프라이머리
    Master,
    /// 레플리카 (레플리카가 없어 프라이머리로 대체된 경우 포함)
    Replica,
}

impl SourceRole {
    /// 역할 태그
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Replica => "replica",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 라우팅 이벤트 인자
pub enum RouteEvent<S> {
    /// [`EVENT_BEFORE_SELECT`]
    BeforeSelect {
        /// 결정된 모드
        mode: ActionMode,
    },
    /// [`EVENT_AFTER_SELECT`]
    AfterSelect {
        /// 역할 태그
        role: SourceRole,
        /// 선택된 소스
        source: Arc<S>,
        /// 사용된 레플리카 인덱스 (프라이머리면 0)
        index: usize,
    },
    /// [`EVENT_BEFORE_QUERY_RUN`]
    BeforeQueryRun {
        /// 원시 구문
        sql: String,
        /// 바인딩 파라미터
        params: Vec<Value>,
    },
}

impl<S> RouteEvent<S> {
    /// 이벤트 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeSelect { .. } => EVENT_BEFORE_SELECT,
            Self::AfterSelect { .. } => EVENT_AFTER_SELECT,
            Self::BeforeQueryRun { .. } => EVENT_BEFORE_QUERY_RUN,
        }
    }
}

impl<S> Clone for RouteEvent<S> {
    fn clone(&self) -> Self {
        match self {
            Self::BeforeSelect { mode } => Self::BeforeSelect { mode: *mode },
            Self::AfterSelect {
                role,
                source,
                index,
            } => Self::AfterSelect {
                role: *role,
                source: Arc::clone(source),
                index: *index,
            },
            Self::BeforeQueryRun { sql, params } => Self::BeforeQueryRun {
                sql: sql.clone(),
                params: params.clone(),
            },
        }
    }
}

impl<S> fmt::Debug for RouteEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeSelect { mode } => {
                f.debug_struct("BeforeSelect").field("mode", mode).finish()
            }
            Self::AfterSelect { role, index, .. } => f
                .debug_struct("AfterSelect")
                .field("role", role)
                .field("index", index)
                .finish(),
            Self::BeforeQueryRun { sql, params } => f
                .debug_struct("BeforeQueryRun")
                .field("sql", sql)
                .field("params", params)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let e: RouteEvent<()> = RouteEvent::BeforeSelect {
            mode: ActionMode::Read,
        };
        assert_eq!(e.name(), EVENT_BEFORE_SELECT);

        let e: RouteEvent<()> = RouteEvent::AfterSelect {
            role: SourceRole::Master,
            source: Arc::new(()),
            index: 0,
        };
        assert_eq!(e.name(), EVENT_AFTER_SELECT);

        let e: RouteEvent<()> = RouteEvent::BeforeQueryRun {
            sql: "DELETE FROM users".to_string(),
            params: vec![],
        };
        assert_eq!(e.name(), EVENT_BEFORE_QUERY_RUN);
    }

    #[test]
    fn test_event_name_format() {
        for name in [EVENT_BEFORE_SELECT, EVENT_AFTER_SELECT, EVENT_BEFORE_QUERY_RUN] {
            assert_eq!(name.matches("::").count(), 1);
        }
        assert_eq!(EVENT_AFTER_SELECT, "after::select_db");
        assert_ne!(EVENT_AFTER_SELECT, "after:select_db");
    }

    #[test]
    fn test_role_tags() {
        assert_eq!(SourceRole::Master.to_string(), "master");
        assert_eq!(SourceRole::Replica.as_str(), "replica");
    }
}
