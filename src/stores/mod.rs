//! The stores of the repository search application.
//!
//! Each store owns a disjoint slice of state and reacts to its own subset of
//! [`Action`](crate::Action)s. More stores can be added without touching the
//! dispatcher.

mod favorite;
mod search;
mod selected;

pub use favorite::{FavoriteRepositoryState, FavoriteRepositoryStore};
pub use search::{SearchRepositoryState, SearchRepositoryStore};
pub use selected::{SelectedRepositoryState, SelectedRepositoryStore};
