//! The action bus.
//!
//! Every state change in a context goes through a single [`Dispatcher`].
//! Stores register a callback with it when they are built, and callers hand
//! it [`Action`](crate::Action)s to broadcast.

mod dispatcher;

pub use dispatcher::{DispatchToken, Dispatcher};
