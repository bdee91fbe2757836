//! Session lifecycle module.
//!
//! A session runs `Inactive → Activating → Active → Deactivating → Inactive`.
//! [`Extension`] drives the transitions; [`SessionContext`] is the explicit
//! host state each transition works on.

mod context;
mod lifecycle;

pub use context::SessionContext;
pub use lifecycle::{Extension, SessionState};
