//! # Fluxion
//!
//! Flux-style unidirectional data flow for Rust.
//!
//! Every change to application state follows the same path:
//!
//! ```text
//! ActionCreator ──→ Dispatcher ──→ Store ──→ listeners (views)
//!       ↑                                          │
//!       └──────────────────────────────────────────┘
//! ```
//!
//! - [`Action`] - Closed set of intents to change state
//! - [`Dispatcher`] - Broadcasts each action to every registered store
//! - [`Store`] - Owns a slice of state, updates it from actions, notifies listeners
//! - [`ActionCreator`] - Talks to the search backend and dispatches the results
//!
//! Stores expose read-only accessors only. Listeners receive no payload and
//! read the store when notified.
//!
//! ```
//! use fluxion::{Action, Dispatcher, SearchRepositoryStore};
//!
//! let dispatcher = Dispatcher::new();
//! let search = SearchRepositoryStore::with_default(&dispatcher);
//!
//! dispatcher.dispatch(Action::SearchQuery(Some("golang".into())));
//! assert_eq!(search.query().as_deref(), Some("golang"));
//! ```

pub mod action;
pub mod action_creator;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod stores;

// Re-export main types for convenience
pub use action::Action;
pub use action_creator::{ActionCreator, FavoriteCache, InMemoryFavoriteCache, SearchApi};
pub use config::{SearchConfig, SearchRequest, SortKey, SortOrder};
pub use dispatcher::{DispatchToken, Dispatcher};
pub use error::{ConfigError, SearchError};
pub use model::{Pagination, Repository, SearchPage, User};
pub use store::{Store, StoreState, Subscription, Transition};
pub use stores::{
    FavoriteRepositoryState, FavoriteRepositoryStore, SearchRepositoryState,
    SearchRepositoryStore, SelectedRepositoryState, SelectedRepositoryStore,
};
