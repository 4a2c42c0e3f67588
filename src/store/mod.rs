//! State containers driven by dispatched actions.
//!
//! A [`Store`] owns one slice of application state. The only way to change
//! that state is to dispatch an [`Action`](crate::Action); views observe the
//! result through listeners and read-only accessors.

mod store;

pub use store::{Store, StoreState, Subscription, Transition};
