//! Mount Engine - Hosts, the movable node, and the event stream.
//!
//! The engine manages the core data structures:
//! - HostRegistry: Host slots, alive flags, what each slot contains
//! - ViewMountManager: The single movable node and its current owner
//! - EventLog: Shared record of lifecycle events
//!
//! # Architecture
//!
//! Ownership is a plain reference held in two places that always agree:
//!
//! ```text
//! HostRegistry                       ViewMountManager
//! host#0 "Container 1" alive  -      owner = host#1
//! host#1 "Container 2" alive  node#0 node  = node#0 (live)
//! ```
//!
//! The manager owns the registry, so the two cannot disagree about which
//! host holds the node. There is no global state.

mod events;
mod host_registry;
mod mount_manager;

pub use events::*;
pub use host_registry::*;
pub use mount_manager::*;
