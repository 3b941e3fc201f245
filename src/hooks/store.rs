//! 이벤트 저장소
//!
//! 이름별로 하나의 핸들러만 유지하는 동기 이벤트 레지스트리입니다.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::result::{HookError, HookResult};

/// 이벤트 핸들러
pub type EventHandler<A> = Arc<dyn Fn(&A) -> HookResult + Send + Sync>;

/// 등록된 이벤트
pub struct Event<A> {
    /// 이벤트 이름
    pub name: String,
    /// 핸들러
    pub handler: EventHandler<A>,
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event").field("name", &self.name).finish()
    }
}

/// 이벤트 저장소
///
/// 내부 맵이 없는 상태(`uninitialized`)는 별도로 구분됩니다.
/// 이 상태에서 `emit`하면 [`HookError::Uninitialized`]를 돌려주고,
/// 맵은 있지만 핸들러가 없으면 빈 결과를 돌려줍니다.
///
/// `emit`은 핸들러 참조만 락 안에서 복사하고 락을 푼 뒤 호출하므로,
/// 핸들러 안에서 같은 저장소의 `on`/`off`/`emit`을 불러도 교착되지 않습니다.
/// 대신 동시에 `off`된 핸들러가 한 번 더 실행될 수 있습니다.
pub struct EventStore<A> {
    /// 이벤트 이름별 핸들러
    observers: RwLock<Option<HashMap<String, Event<A>>>>,
}

impl<A> EventStore<A> {
    /// 새 저장소 생성
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Some(HashMap::new())),
        }
    }

    /// 생성되지 않은 저장소
    ///
    /// 첫 `on` 호출 시 맵이 만들어집니다.
    pub fn uninitialized() -> Self {
        Self {
            observers: RwLock::new(None),
        }
    }

    /// 맵 생성 여부
    pub fn is_initialized(&self) -> bool {
        self.observers.read().is_some()
    }

    /// 핸들러 등록. 같은 이름의 기존 핸들러는 교체됨
    pub fn on<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&A) -> HookResult + Send + Sync + 'static,
    {
        let name = name.into();
        let event = Event {
            name: name.clone(),
            handler: Arc::new(handler),
        };

        let mut observers = self.observers.write();
        let map = observers.get_or_insert_with(|| {
            tracing::debug!(event = %name, "hook store constructed on first registration");
            HashMap::new()
        });
        map.insert(name, event);
    }

    /// 이벤트 발행
    pub fn emit(&self, name: &str, args: &A) -> HookResult {
        let handler = {
            let observers = self.observers.read();
            match observers.as_ref() {
                None => return HookResult::with_error(HookError::Uninitialized),
                Some(map) => match map.get(name) {
                    Some(event) => Arc::clone(&event.handler),
                    None => return HookResult::empty(),
                },
            }
        };

        handler(args)
    }

    /// 핸들러 제거. 없으면 아무 일도 하지 않음
    pub fn off(&self, name: &str) {
        let mut observers = self.observers.write();
        if let Some(map) = observers.as_mut() {
            map.remove(name);
        }
    }

    /// 핸들러 등록 여부
    pub fn contains(&self, name: &str) -> bool {
        self.observers
            .read()
            .as_ref()
            .map(|map| map.contains_key(name))
            .unwrap_or(false)
    }

    /// 등록된 핸들러 수
    pub fn len(&self) -> usize {
        self.observers.read().as_ref().map(HashMap::len).unwrap_or(0)
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A> Default for EventStore<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventStore<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self.observers.read();
        let names: Option<Vec<&String>> = observers.as_ref().map(|map| map.keys().collect());
        f.debug_struct("EventStore").field("observers", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_uninitialized() {
        let store: EventStore<u32> = EventStore::uninitialized();
        assert!(!store.is_initialized());

        let result = store.emit("anything", &1);
        assert_eq!(result.error, Some(HookError::Uninitialized));
        assert!(result.data.is_none());
    }

    #[test]
    fn test_emit_unregistered_is_noop() {
        let store: EventStore<u32> = EventStore::new();
        let result = store.emit("missing", &1);
        assert!(result.is_empty());
    }

    #[test]
    fn test_emit_returns_handler_result() {
        let store: EventStore<u32> = EventStore::new();
        store.on("double", |n: &u32| HookResult::with_data(n * 2));

        let result = store.emit("double", &21);
        assert_eq!(result.data_as::<u32>(), Some(&42));
        assert!(result.is_ok());

        store.on("fail", |_: &u32| HookResult::with_error(HookError::handler("nope")));
        let result = store.emit("fail", &0);
        assert_eq!(result.error, Some(HookError::handler("nope")));
    }

    #[test]
    fn test_last_registration_wins() {
        let store: EventStore<()> = EventStore::new();
        store.on("e", |_: &()| HookResult::with_data("first"));
        store.on("e", |_: &()| HookResult::with_data("second"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.emit("e", &()).data_as::<&'static str>(), Some(&"second"));
    }

    #[test]
    fn test_off() {
        let store: EventStore<()> = EventStore::new();
        store.on("e", |_: &()| HookResult::with_data(1u8));
        assert!(store.contains("e"));

        store.off("e");
        assert!(!store.contains("e"));
        assert!(store.emit("e", &()).is_empty());

        // 없는 이름과 미생성 저장소에서도 no-op
        store.off("e");
        let uninit: EventStore<()> = EventStore::uninitialized();
        uninit.off("e");
        assert!(!uninit.is_initialized());
    }

    #[test]
    fn test_on_initializes_lazily() {
        let store: EventStore<()> = EventStore::uninitialized();
        store.on("e", |_: &()| HookResult::empty());

        assert!(store.is_initialized());
        assert!(store.emit("other", &()).is_empty());
    }

    #[test]
    fn test_handler_can_reenter_store() {
        let store: Arc<EventStore<()>> = Arc::new(EventStore::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let inner_store = Arc::clone(&store);
        let inner_calls = Arc::clone(&calls);
        store.on("outer", move |_: &()| {
            inner_calls.fetch_add(1, Ordering::SeqCst);
            // 락이 풀린 상태이므로 재진입 가능
            inner_store.on("inner", |_: &()| HookResult::with_data(7i32));
            inner_store.off("outer");
            inner_store.emit("inner", &())
        });

        let result = store.emit("outer", &());
        assert_eq!(result.data_as::<i32>(), Some(&7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!store.contains("outer"));
        assert!(store.contains("inner"));
    }

    #[test]
    fn test_concurrent_registration_and_emit() {
        let store: EventStore<usize> = EventStore::new();
        let hits = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for i in 0..4 {
                let store = &store;
                s.spawn(move || {
                    store.on(format!("e{}", i), |n: &usize| HookResult::with_data(*n));
                });
            }
        });

        std::thread::scope(|s| {
            for i in 0..4 {
                let store = &store;
                let hits = &hits;
                s.spawn(move || {
                    let result = store.emit(&format!("e{}", i), &i);
                    if result.data_as::<usize>() == Some(&i) {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(store.len(), 4);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}
