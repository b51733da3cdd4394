//! Domain building blocks shared by every InternHub crate.
//!
//! Nothing in here performs I/O: roles, statuses, validation rules, the
//! error taxonomy, the route-guard state machine and the client-side
//! derivations (deduplication, grouping) that the views rely on.

pub mod derived;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod roles;
pub mod session;
pub mod status;
pub mod types;
pub mod validation;
