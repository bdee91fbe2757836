//! Action dispatch module.
//!
//! Turns bound [`Action`](crate::commands::Action) descriptions into host calls.

mod dispatcher;

pub use dispatcher::ActionDispatcher;
