//! Host Registry - The set of containers a node can live in.
//!
//! Manages host slots:
//! - Slot allocation with name lookup
//! - Alive flag, flipped once when the host is destroyed
//! - The id of the node a slot currently contains
//!
//! A registry is handed to exactly one
//! [`ViewMountManager`](super::ViewMountManager), which is the only way to
//! destroy a host. Destruction notifies the manager before the slot lets go
//! of its node, so whatever the host contained is torn down before the host
//! itself is reported gone.

use crate::error::{MountError, Result};
use crate::types::{HostId, LifecycleEvent, NodeId};

use super::events::EventLog;

// =============================================================================
// Host Slot
// =============================================================================

/// A container able to hold at most one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSlot {
    id: HostId,
    name: String,
    alive: bool,
    contained: Option<NodeId>,
}

impl HostSlot {
    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// The node this slot currently owns.
    pub fn contained(&self) -> Option<NodeId> {
        self.contained
    }
}

// =============================================================================
// Host Observer
// =============================================================================

/// Receives host destruction notices.
pub(crate) trait HostObserver {
    /// Called once when `host` goes from alive to dead. The slot still
    /// reports what it contained at that moment.
    fn on_host_destroyed(&mut self, host: &HostSlot);
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug)]
pub struct HostRegistry {
    slots: Vec<HostSlot>,
    events: EventLog,
}

impl HostRegistry {
    pub fn new(events: EventLog) -> Self {
        Self {
            slots: Vec::new(),
            events,
        }
    }

    /// Register a host. Hosts may start out already dead.
    pub fn add_host(&mut self, name: impl Into<String>, alive: bool) -> HostId {
        let id = HostId(self.slots.len());
        self.slots.push(HostSlot {
            id,
            name: name.into(),
            alive,
            contained: None,
        });
        id
    }

    pub fn get(&self, id: HostId) -> Option<&HostSlot> {
        self.slots.get(id.0)
    }

    /// Like [`get`](Self::get) but fails with [`MountError::UnknownHost`].
    pub fn slot(&self, id: HostId) -> Result<&HostSlot> {
        self.get(id).ok_or_else(|| MountError::UnknownHost(id.to_string()))
    }

    /// Look up a host by name. The first match wins.
    pub fn find(&self, name: &str) -> Option<HostId> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.id)
    }

    pub fn slots(&self) -> &[HostSlot] {
        &self.slots
    }

    pub fn live_hosts(&self) -> impl Iterator<Item = &HostSlot> {
        self.slots.iter().filter(|slot| slot.alive)
    }

    /// Slots currently holding a node. Never more than one.
    pub fn occupied_hosts(&self) -> impl Iterator<Item = &HostSlot> {
        self.slots.iter().filter(|slot| slot.contained.is_some())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Destroy a host and notify `observer`.
    ///
    /// Returns `Ok(false)` without any notification if the host was already
    /// dead.
    pub(crate) fn destroy(
        &mut self,
        id: HostId,
        observer: &mut dyn HostObserver,
    ) -> Result<bool> {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return Err(MountError::UnknownHost(id.to_string()));
        };
        if !slot.alive {
            return Ok(false);
        }
        slot.alive = false;

        // Contents first, then the host itself
        observer.on_host_destroyed(slot);

        slot.contained = None;
        self.events.record(LifecycleEvent::HostDestroyed {
            host: slot.name.clone(),
        });
        Ok(true)
    }

    pub(crate) fn events(&self) -> &EventLog {
        &self.events
    }

    pub(crate) fn set_contained(&mut self, id: HostId, node: Option<NodeId>) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.contained = node;
        }
    }
}
