//! Core types for the mount engine.
//!
//! Hosts and nodes are addressed by small copyable ids. Names are only
//! carried where a human reads them (events and errors).

use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a host slot inside a [`HostRegistry`](crate::engine::HostRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub usize);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

/// Identifier of a view node created by a
/// [`ViewMountManager`](crate::engine::ViewMountManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

// =============================================================================
// Node State
// =============================================================================

/// Lifecycle of the movable node.
///
/// ```text
/// Unmounted -> Mounted(a) -> Mounted(b) -> ... -> Destroyed
/// ```
///
/// `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Unmounted,
    Mounted(HostId),
    Destroyed,
}

impl NodeState {
    /// Current owner, if mounted.
    pub fn owner(&self) -> Option<HostId> {
        match self {
            Self::Mounted(host) => Some(*host),
            _ => None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

// =============================================================================
// Event Kinds (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Event kinds as a bitfield, used to filter what an
    /// [`EventLog`](crate::engine::EventLog) records.
    ///
    /// Combine with bitwise OR: `EventKind::NODE_MOVED | EventKind::NODE_DESTROYED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EventKind: u8 {
        const NODE_MOUNTED = 1 << 0;
        const NODE_MOVED = 1 << 1;
        const HOST_DESTROYED = 1 << 2;
        const NODE_DESTROYED = 1 << 3;
        const ALL = Self::NODE_MOUNTED.bits()
            | Self::NODE_MOVED.bits()
            | Self::HOST_DESTROYED.bits()
            | Self::NODE_DESTROYED.bits();
    }
}

impl Default for EventKind {
    fn default() -> Self {
        Self::ALL
    }
}

// =============================================================================
// Lifecycle Events
// =============================================================================

/// Something observable that happened to a host or the node.
///
/// Host fields hold the host's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    NodeMounted { node: NodeId, host: String },
    NodeMoved { node: NodeId, from: String, to: String },
    HostDestroyed { host: String },
    /// Emitted once per node, tagged with the host that owned it last.
    NodeDestroyed { node: NodeId, owner: String },
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::NodeMounted { .. } => EventKind::NODE_MOUNTED,
            Self::NodeMoved { .. } => EventKind::NODE_MOVED,
            Self::HostDestroyed { .. } => EventKind::HOST_DESTROYED,
            Self::NodeDestroyed { .. } => EventKind::NODE_DESTROYED,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeMounted { host, .. } => write!(f, "mounted: {host}"),
            Self::NodeMoved { from, to, .. } => write!(f, "moved: {from} -> {to}"),
            Self::HostDestroyed { host } => write!(f, "host destroyed: {host}"),
            Self::NodeDestroyed { owner, .. } => write!(f, "destroyed: {owner}"),
        }
    }
}
