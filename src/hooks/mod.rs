//! 이벤트 훅
//!
//! 라우팅 결정의 정해진 지점에서 동기적으로 호출되는 이름 기반 확장 지점입니다.
//! 이름마다 구독자는 하나이며, 나중에 등록한 핸들러가 이전 핸들러를 대체합니다.
//!
//! # 예시
//!
//! ```rust
//! use dbresolver::hooks::{EventStore, HookResult};
//!
//! let store: EventStore<String> = EventStore::new();
//! store.on("greet", |name: &String| HookResult::with_data(format!("hello {}", name)));
//!
//! let result = store.emit("greet", &"replica".to_string());
//! assert_eq!(result.data_as::<String>().map(String::as_str), Some("hello replica"));
//! ```

mod result;
mod store;

pub use result::{HookError, HookResult};
pub use store::{Event, EventHandler, EventStore};
