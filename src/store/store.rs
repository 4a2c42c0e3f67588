use std::any::type_name;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::action::Action;
use crate::dispatcher::{DispatchToken, Dispatcher};

type Listener = Arc<dyn Fn() + Send + Sync>;

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Outcome of applying an action to a store's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State was updated; listeners are notified.
    Changed,
    /// The action is not relevant to this store; nothing happens.
    Ignored,
}

/// The private state of a store and the transform that updates it.
///
/// `on_dispatch` is the only code allowed to mutate the state. It sees every
/// action dispatched in the store's context and reports whether it changed
/// anything.
///
/// `Clone` lets a store keep handing out snapshots to readers while a newer
/// version is being built.
pub trait StoreState: Clone + Send + Sync + 'static {
    fn on_dispatch(&mut self, action: &Action) -> Transition;
}

/// Handle returned by [`Store::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    fn next() -> Self {
        Subscription(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Default)]
struct ListenerRegistry {
    listeners: Vec<(Subscription, Listener)>,
}

impl ListenerRegistry {
    fn contains(&self, subscription: Subscription) -> bool {
        self.listeners.iter().any(|(id, _)| *id == subscription)
    }
}

struct StoreInner<S> {
    // The lock is only held to swap or clone the `Arc`, never while user code
    // runs, so readers can dispatch and dispatchers never wait on readers.
    state: RwLock<Arc<S>>,
    listeners: Mutex<ListenerRegistry>,
    alive: AtomicBool,
}

impl<S: StoreState> StoreInner<S> {
    fn on_dispatch(&self, action: &Action) {
        if !self.alive.load(Ordering::Acquire) {
            tracing::trace!(
                store = type_name::<S>(),
                action = action.name(),
                "store torn down, skipping"
            );
            return;
        }

        let transition = {
            let mut state = self.state.write();
            Arc::make_mut(&mut *state).on_dispatch(action)
        };

        match transition {
            Transition::Ignored => {}
            Transition::Changed => {
                tracing::trace!(
                    store = type_name::<S>(),
                    action = action.name(),
                    "applied action"
                );
                self.emit_change();
            }
        }
    }

    fn snapshot(&self) -> Arc<S> {
        Arc::clone(&*self.state.read())
    }

    fn emit_change(&self) {
        let snapshot: Vec<(Subscription, Listener)> = self
            .listeners
            .lock()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        tracing::trace!(
            store = type_name::<S>(),
            listeners = snapshot.len(),
            "emitting change"
        );

        for (id, listener) in snapshot {
            // An earlier listener may have removed this one.
            if self.listeners.lock().contains(id) {
                listener();
            }
        }
    }
}

/// A state container bound to a [`Dispatcher`].
///
/// Building a store registers it with the dispatcher; from then on every
/// dispatched action runs through `S::on_dispatch`, and a
/// [`Transition::Changed`] result notifies every listener. Listeners take no
/// arguments: they read whatever they need from the store when called, so
/// they always observe current state.
///
/// Dropping the store unregisters it. If the drop happens while a dispatch is
/// in flight, the store's callback is still in that dispatch's snapshot but
/// returns without touching state.
///
/// # Examples
///
/// ```
/// use fluxion::{Action, Dispatcher, Store, StoreState, Transition};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Clone, Default)]
/// struct Editing(bool);
///
/// impl StoreState for Editing {
///     fn on_dispatch(&mut self, action: &Action) -> Transition {
///         match action {
///             Action::IsSearchFieldEditing(editing) => {
///                 self.0 = *editing;
///                 Transition::Changed
///             }
///             _ => Transition::Ignored,
///         }
///     }
/// }
///
/// let dispatcher = Dispatcher::new();
/// let store = Store::<Editing>::with_default(&dispatcher);
///
/// let changes = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&changes);
/// store.add_listener(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// dispatcher.dispatch(Action::IsSearchFieldEditing(true));
/// dispatcher.dispatch(Action::ClearSearchRepositories);
///
/// assert!(store.read(|state| state.0));
/// assert_eq!(changes.load(Ordering::SeqCst), 1);
/// ```
pub struct Store<S: StoreState> {
    inner: Arc<StoreInner<S>>,
    dispatcher: Dispatcher,
    token: DispatchToken,
}

impl<S: StoreState> Store<S> {
    /// Create a store with the given initial state and register it with
    /// `dispatcher`.
    pub fn new(dispatcher: &Dispatcher, initial: S) -> Self {
        let inner = Arc::new(StoreInner {
            state: RwLock::new(Arc::new(initial)),
            listeners: Mutex::new(ListenerRegistry::default()),
            alive: AtomicBool::new(true),
        });

        let callback_inner = Arc::clone(&inner);
        let token = dispatcher.register(move |action| callback_inner.on_dispatch(action));

        tracing::debug!(store = type_name::<S>(), %token, "store registered");

        Self {
            inner,
            dispatcher: dispatcher.clone(),
            token,
        }
    }

    /// Create a store starting from `S::default()`.
    pub fn with_default(dispatcher: &Dispatcher) -> Self
    where
        S: Default,
    {
        Self::new(dispatcher, S::default())
    }

    /// Read the current state without cloning it.
    ///
    /// `f` runs on a snapshot with no lock held, so it may dispatch or
    /// manage listeners. Changes made meanwhile are not visible to `f`.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.inner.snapshot();
        f(&state)
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> S {
        S::clone(&self.inner.snapshot())
    }

    /// Subscribe to change notifications.
    ///
    /// Listeners are called in the order they were added, on the thread that
    /// dispatched the action.
    pub fn add_listener<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let subscription = Subscription::next();
        self.inner
            .listeners
            .lock()
            .listeners
            .push((subscription, Arc::new(callback)));
        subscription
    }

    /// Stop notifying a listener. Unknown subscriptions are ignored.
    pub fn remove_listener(&self, subscription: Subscription) {
        let removed = {
            let mut registry = self.inner.listeners.lock();
            registry
                .listeners
                .iter()
                .position(|(id, _)| *id == subscription)
                .map(|index| registry.listeners.remove(index))
        };
        drop(removed);
    }

    /// Number of listeners currently subscribed.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().listeners.len()
    }

    /// The token this store was registered with.
    pub fn dispatch_token(&self) -> DispatchToken {
        self.token
    }
}

impl<S: StoreState> Drop for Store<S> {
    fn drop(&mut self) {
        self.inner.alive.store(false, Ordering::Release);
        self.dispatcher.unregister(self.token);
        tracing::debug!(store = type_name::<S>(), token = %self.token, "store torn down");
    }
}

impl<S: StoreState + fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.snapshot())
            .field("listeners", &self.listener_count())
            .field("token", &self.token)
            .finish()
    }
}
