//! 훅 결과 타입

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// 훅 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// 생성되지 않은 저장소에서 발행
    #[error("store_empty")]
    Uninitialized,

    /// 핸들러가 보고한 에러
    #[error("Handler error: {0}")]
    Handler(String),
}

impl HookError {
    /// 핸들러 에러 생성
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}

/// 훅 실행 결과
///
/// 핸들러가 반환한 값이 `emit` 호출자에게 그대로 전달됩니다.
#[derive(Default)]
pub struct HookResult {
    /// 핸들러가 돌려준 값
    pub data: Option<Box<dyn Any + Send + Sync>>,
    /// 에러
    pub error: Option<HookError>,
}

impl HookResult {
    /// 빈 결과 (구독자 없음)
    pub fn empty() -> Self {
        Self::default()
    }

    /// 값을 담은 결과
    pub fn with_data<T: Any + Send + Sync>(data: T) -> Self {
        Self {
            data: Some(Box::new(data)),
            error: None,
        }
    }

    /// 에러를 담은 결과
    pub fn with_error(error: HookError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// 에러 없음 여부
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// 값도 에러도 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    /// 값을 특정 타입으로 참조
    pub fn data_as<T: Any>(&self) -> Option<&T> {
        self.data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }
}

impl fmt::Debug for HookResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookResult")
            .field("has_data", &self.data.is_some())
            .field("error", &self.error)
            .finish()
    }
}
