use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::action::Action;

type Callback = Arc<dyn Fn(&Action) + Send + Sync>;

// Process-wide so tokens from different dispatchers never compare equal.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`Dispatcher::register`].
///
/// Only useful for [`Dispatcher::unregister`]. Tokens are unique within the
/// process and increase with registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchToken(u64);

impl DispatchToken {
    fn next() -> Self {
        DispatchToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-{}", self.0)
    }
}

/// Callback registry guarded by the dispatcher's lock.
///
/// The `RefCell` is only borrowed for the duration of a lookup or an
/// insert/remove, never while a callback runs, so a callback may register,
/// unregister or dispatch again on the same thread.
struct CallbackRegistry {
    callbacks: RefCell<BTreeMap<DispatchToken, Callback>>,
    depth: Cell<usize>,
}

impl CallbackRegistry {
    fn new() -> Self {
        Self {
            callbacks: RefCell::new(BTreeMap::new()),
            depth: Cell::new(0),
        }
    }

    fn snapshot(&self) -> Vec<Callback> {
        self.callbacks.borrow().values().cloned().collect()
    }

    fn enter(&self) -> DepthGuard<'_> {
        self.depth.set(self.depth.get() + 1);
        DepthGuard(&self.depth)
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl DepthGuard<'_> {
    fn depth(&self) -> usize {
        self.0.get()
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Broadcasts actions to every registered callback.
///
/// A dispatcher is a cheap handle: clones share one registry. Build one per
/// context and pass it to the stores and action creators that belong to it.
///
/// All three operations take the same re-entrant lock, so calls from
/// different threads are serialized while a callback may call back into the
/// dispatcher from the thread that is dispatching.
///
/// # Nested dispatch
///
/// A callback that dispatches another action sees that action delivered to
/// every callback (and any dispatch *it* triggers) before the outer dispatch
/// moves on to the next callback.
///
/// ```
/// use fluxion::{Action, Dispatcher};
/// use std::sync::{Arc, Mutex};
///
/// let dispatcher = Dispatcher::new();
/// let log = Arc::new(Mutex::new(Vec::new()));
///
/// let inner = dispatcher.clone();
/// let first = Arc::clone(&log);
/// dispatcher.register(move |action| {
///     first.lock().unwrap().push(format!("first:{}", action.name()));
///     if *action == Action::ClearSearchRepositories {
///         inner.dispatch(Action::IsRepositoriesFetching(false));
///     }
/// });
/// let second = Arc::clone(&log);
/// dispatcher.register(move |action| {
///     second.lock().unwrap().push(format!("second:{}", action.name()));
/// });
///
/// dispatcher.dispatch(Action::ClearSearchRepositories);
///
/// assert_eq!(
///     *log.lock().unwrap(),
///     [
///         "first:clear_search_repositories",
///         "first:is_repositories_fetching",
///         "second:is_repositories_fetching",
///         "second:clear_search_repositories",
///     ]
/// );
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ReentrantMutex<CallbackRegistry>>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ReentrantMutex::new(CallbackRegistry::new())),
        }
    }

    /// Register a callback to receive every dispatched action.
    pub fn register<F>(&self, callback: F) -> DispatchToken
    where
        F: Fn(&Action) + Send + Sync + 'static,
    {
        let registry = self.registry.lock();
        let token = DispatchToken::next();
        registry
            .callbacks
            .borrow_mut()
            .insert(token, Arc::new(callback));
        tracing::debug!(%token, "registered dispatch callback");
        token
    }

    /// Remove a callback. Unknown or already removed tokens are ignored.
    pub fn unregister(&self, token: DispatchToken) {
        let registry = self.registry.lock();
        let removed = registry.callbacks.borrow_mut().remove(&token);
        if removed.is_some() {
            tracing::debug!(%token, "unregistered dispatch callback");
        }
        // The callback may own the last reference to whatever registered it,
        // so drop it after the borrow has ended.
        drop(removed);
    }

    /// Deliver `action` to every callback registered when the dispatch starts.
    ///
    /// Blocks until every callback, and every dispatch they trigger, has
    /// returned. Callbacks run on the calling thread in registration order.
    /// Callbacks registered during the dispatch are not called for this
    /// action; callbacks unregistered during it still are, so anything that
    /// unregisters mid-dispatch must tolerate one late call.
    pub fn dispatch(&self, action: Action) {
        let registry = self.registry.lock();
        let callbacks = registry.snapshot();
        let depth = registry.enter();

        tracing::trace!(
            action = action.name(),
            depth = depth.depth(),
            callbacks = callbacks.len(),
            "dispatching"
        );

        for callback in &callbacks {
            callback(&action);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.registry.lock().callbacks.borrow().len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `token` is still registered with this dispatcher.
    pub fn is_registered(&self, token: DispatchToken) -> bool {
        self.registry.lock().callbacks.borrow().contains_key(&token)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("callbacks", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    fn recorder(dispatcher: &Dispatcher) -> (DispatchToken, Arc<Mutex<Vec<Action>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let token = dispatcher.register(move |action| {
            seen_clone.lock().unwrap().push(action.clone());
        });
        (token, seen)
    }

    #[test]
    fn every_callback_sees_action_once() {
        let dispatcher = Dispatcher::new();
        let recorders: Vec<_> = (0..5).map(|_| recorder(&dispatcher)).collect();

        dispatcher.dispatch(Action::SearchQuery(Some("rust".into())));

        for (_, seen) in &recorders {
            assert_eq!(
                *seen.lock().unwrap(),
                [Action::SearchQuery(Some("rust".into()))]
            );
        }
    }

    #[test]
    fn tokens_are_unique_across_dispatchers() {
        let a = Dispatcher::new();
        let b = Dispatcher::new();
        let ta = a.register(|_| {});
        let tb = b.register(|_| {});
        assert_ne!(ta, tb);
        assert!(a.is_registered(ta));
        assert!(!a.is_registered(tb));
    }

    #[test]
    fn unregister_is_idempotent() {
        let dispatcher = Dispatcher::new();
        let (first, first_seen) = recorder(&dispatcher);
        let (_second, second_seen) = recorder(&dispatcher);

        dispatcher.unregister(first);
        dispatcher.unregister(first);

        let stranger = Dispatcher::new().register(|_| {});
        dispatcher.unregister(stranger);

        assert_eq!(dispatcher.len(), 1);

        dispatcher.dispatch(Action::ClearSearchRepositories);
        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(second_seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn delivery_follows_registration_order() {
        let dispatcher = Dispatcher::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..4 {
            let order = Arc::clone(&order);
            dispatcher.register(move |_| order.lock().unwrap().push(i));
        }

        dispatcher.dispatch(Action::ClearSearchRepositories);
        dispatcher.dispatch(Action::ClearSearchRepositories);

        assert_eq!(*order.lock().unwrap(), [0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn nested_dispatch_drains_before_outer_resumes() {
        let dispatcher = Dispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_a = Arc::clone(&log);
        dispatcher.register(move |action| {
            log_a.lock().unwrap().push(("a", action.clone()));
        });

        let nested = dispatcher.clone();
        let log_b = Arc::clone(&log);
        dispatcher.register(move |action| {
            log_b.lock().unwrap().push(("b", action.clone()));
            if let Action::IsSearchFieldEditing(true) = action {
                nested.dispatch(Action::IsSearchFieldEditing(false));
            }
        });

        let log_c = Arc::clone(&log);
        dispatcher.register(move |action| {
            log_c.lock().unwrap().push(("c", action.clone()));
        });

        dispatcher.dispatch(Action::IsSearchFieldEditing(true));

        let outer = Action::IsSearchFieldEditing(true);
        let inner = Action::IsSearchFieldEditing(false);
        assert_eq!(
            *log.lock().unwrap(),
            [
                ("a", outer.clone()),
                ("b", outer.clone()),
                ("a", inner.clone()),
                ("b", inner.clone()),
                ("c", inner),
                ("c", outer),
            ]
        );
    }

    #[test]
    fn register_during_dispatch_applies_to_next_dispatch() {
        let dispatcher = Dispatcher::new();
        let late_calls = Arc::new(AtomicUsize::new(0));

        let inner = dispatcher.clone();
        let late = Arc::clone(&late_calls);
        let registered = Arc::new(AtomicBool::new(false));
        dispatcher.register(move |_| {
            if !registered.swap(true, Ordering::SeqCst) {
                let late = Arc::clone(&late);
                inner.register(move |_| {
                    late.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        dispatcher.dispatch(Action::ClearSearchRepositories);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.len(), 2);

        dispatcher.dispatch(Action::ClearSearchRepositories);
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_can_unregister_itself() {
        let dispatcher = Dispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let token_slot: Arc<Mutex<Option<DispatchToken>>> = Arc::new(Mutex::new(None));

        let inner = dispatcher.clone();
        let slot = Arc::clone(&token_slot);
        let counter = Arc::clone(&calls);
        let token = dispatcher.register(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(token) = slot.lock().unwrap().take() {
                inner.unregister(token);
            }
        });
        *token_slot.lock().unwrap() = Some(token);

        dispatcher.dispatch(Action::ClearSearchRepositories);
        dispatcher.dispatch(Action::ClearSearchRepositories);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn concurrent_dispatches_do_not_interleave() {
        let dispatcher = Dispatcher::new();
        let busy = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicUsize::new(0));
        let delivered = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let busy = Arc::clone(&busy);
            let overlaps = Arc::clone(&overlaps);
            let delivered = Arc::clone(&delivered);
            dispatcher.register(move |_| {
                if busy.swap(true, Ordering::SeqCst) {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                thread::sleep(Duration::from_micros(50));
                delivered.fetch_add(1, Ordering::SeqCst);
                busy.store(false, Ordering::SeqCst);
            });
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        dispatcher.dispatch(Action::IsRepositoriesFetching(true));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(delivered.load(Ordering::SeqCst), 8 * 10 * 2);
    }

    #[test]
    fn dispatcher_survives_panicking_callback() {
        let dispatcher = Dispatcher::new();
        let token = dispatcher.register(|_| panic!("boom"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            dispatcher.dispatch(Action::ClearSearchRepositories);
        }));
        assert!(result.is_err());

        dispatcher.unregister(token);
        let (_, seen) = recorder(&dispatcher);
        dispatcher.dispatch(Action::ClearSearchRepositories);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
