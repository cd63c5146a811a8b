//! # spark-remount
//!
//! Move a mounted view between host containers at runtime, with teardown
//! that follows ownership.
//!
//! ## Architecture
//!
//! A single view node is created inside one host, then detached and
//! reattached to another. Destroying a host tears down the node only if
//! that host is its *current* owner; a host the node already left can be
//! destroyed without touching it.
//!
//! ```text
//! mount(A) -> move_to(B) -> destroy(A)   node alive, no event
//!                        -> destroy(B)   "destroyed: B"
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids, node state, lifecycle events
//! - [`engine`] - Host registry, mount manager, event log
//! - [`stage`] - Name-based driver wiring the engine together
//! - [`logging`] - tracing subscriber setup

pub mod engine;
pub mod error;
pub mod logging;
pub mod stage;
pub mod types;

pub use types::*;

pub use error::{MountError, Result};

pub use engine::{EventLog, HostRegistry, HostSlot, ViewMountManager, ViewNode};

pub use stage::{Stage, StageConfig};
