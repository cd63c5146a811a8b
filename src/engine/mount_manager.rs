//! View Mount Manager - Owns the movable node and the hosts it can live in.
//!
//! The node is created on the first [`mount`](ViewMountManager::mount) and
//! is never recreated. Moving it only changes which host slot refers to it.
//!
//! # Ownership
//!
//! The manager takes the [`HostRegistry`] by value, so every host
//! destruction goes through [`destroy_host`](ViewMountManager::destroy_host)
//! and the manager always hears about it. Exactly one live host slot refers
//! to a live node. A host the node has left has no further say in its
//! lifecycle:
//!
//! ```ignore
//! let mut manager = ViewMountManager::new(registry);
//! manager.mount(a)?;
//! manager.move_to(b)?;
//!
//! manager.destroy_host(a)?; // node survives
//! manager.destroy_host(b)?; // "destroyed: b"
//! ```

use crate::error::{MountError, Result};
use crate::types::{HostId, LifecycleEvent, NodeId, NodeState};

use super::events::EventLog;
use super::host_registry::{HostObserver, HostRegistry, HostSlot};

/// One node per manager.
const NODE_ID: NodeId = NodeId(0);

/// The leaf unit of ownership. Once destroyed, stays destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewNode {
    id: NodeId,
    destroyed: bool,
}

impl ViewNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

// =============================================================================
// Node Lifecycle
// =============================================================================

/// Node state plus its destroy hooks. Kept apart from the registry so the
/// registry can notify it while both are borrowed.
struct NodeLifecycle {
    state: NodeState,
    destroy_callbacks: Vec<Box<dyn FnOnce()>>,
    events: EventLog,
}

impl NodeLifecycle {
    fn ensure_not_destroyed(&self) -> Result<()> {
        if self.state.is_destroyed() {
            return Err(MountError::NodeDestroyed { node: NODE_ID });
        }
        Ok(())
    }

    fn run_destroy_callbacks(&mut self) {
        for callback in std::mem::take(&mut self.destroy_callbacks) {
            callback();
        }
    }
}

impl HostObserver for NodeLifecycle {
    fn on_host_destroyed(&mut self, host: &HostSlot) {
        // Former owners have no effect
        if self.state != NodeState::Mounted(host.id()) {
            return;
        }

        self.state = NodeState::Destroyed;
        self.run_destroy_callbacks();

        self.events.record(LifecycleEvent::NodeDestroyed {
            node: NODE_ID,
            owner: host.name().to_string(),
        });
    }
}

// =============================================================================
// Manager
// =============================================================================

pub struct ViewMountManager {
    hosts: HostRegistry,
    node: NodeLifecycle,
}

impl std::fmt::Debug for ViewMountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewMountManager")
            .field("hosts", &self.hosts)
            .field("state", &self.node.state)
            .field("destroy_callbacks", &self.node.destroy_callbacks.len())
            .finish()
    }
}

impl ViewMountManager {
    /// Take ownership of `hosts`. Lifecycle events go to the registry's log.
    pub fn new(hosts: HostRegistry) -> Self {
        let events = hosts.events().clone();
        Self {
            hosts,
            node: NodeLifecycle {
                state: NodeState::Unmounted,
                destroy_callbacks: Vec::new(),
                events,
            },
        }
    }

    pub fn hosts(&self) -> &HostRegistry {
        &self.hosts
    }

    /// Register another host.
    pub fn add_host(&mut self, name: impl Into<String>, alive: bool) -> HostId {
        self.hosts.add_host(name, alive)
    }

    pub fn node(&self) -> Option<ViewNode> {
        match self.node.state {
            NodeState::Unmounted => None,
            NodeState::Mounted(_) => Some(ViewNode {
                id: NODE_ID,
                destroyed: false,
            }),
            NodeState::Destroyed => Some(ViewNode {
                id: NODE_ID,
                destroyed: true,
            }),
        }
    }

    /// Host currently owning the node.
    pub fn owner(&self) -> Option<HostId> {
        self.node.state.owner()
    }

    pub fn state(&self) -> NodeState {
        self.node.state
    }

    /// The current owner, or the error any move would fail with first.
    pub fn mounted_owner(&self) -> Result<HostId> {
        match self.node.state {
            NodeState::Mounted(owner) => Ok(owner),
            NodeState::Unmounted => Err(MountError::NoNodeMounted),
            NodeState::Destroyed => Err(MountError::NodeDestroyed { node: NODE_ID }),
        }
    }

    /// Create the node inside `host`. Only valid once.
    pub fn mount(&mut self, host: HostId) -> Result<NodeId> {
        self.node.ensure_not_destroyed()?;
        if self.node.state != NodeState::Unmounted {
            return Err(MountError::AlreadyMounted { node: NODE_ID });
        }
        let slot = self.hosts.slot(host)?;
        if !slot.is_alive() {
            return Err(MountError::DeadHost {
                host: slot.name().to_string(),
            });
        }
        if slot.contained().is_some() {
            return Err(MountError::InvalidTarget {
                host: slot.name().to_string(),
            });
        }
        let host_name = slot.name().to_string();

        self.node.state = NodeState::Mounted(host);
        self.hosts.set_contained(host, Some(NODE_ID));

        self.node.events.record(LifecycleEvent::NodeMounted {
            node: NODE_ID,
            host: host_name,
        });
        Ok(NODE_ID)
    }

    /// Transfer the node to `target` without recreating it.
    pub fn move_to(&mut self, target: HostId) -> Result<()> {
        let owner = self.mounted_owner()?;
        let target_slot = self.hosts.slot(target)?;
        if target == owner {
            return Err(MountError::InvalidTarget {
                host: target_slot.name().to_string(),
            });
        }
        if !target_slot.is_alive() {
            return Err(MountError::DeadHost {
                host: target_slot.name().to_string(),
            });
        }
        let to = target_slot.name().to_string();
        let from = self
            .hosts
            .get(owner)
            .map(|slot| slot.name().to_string())
            .unwrap_or_else(|| owner.to_string());

        // Detach, then insert
        self.hosts.set_contained(owner, None);
        self.hosts.set_contained(target, Some(NODE_ID));
        self.node.state = NodeState::Mounted(target);

        self.node.events.record(LifecycleEvent::NodeMoved {
            node: NODE_ID,
            from,
            to,
        });
        Ok(())
    }

    /// Destroy a host. Returns `false` if it was already dead.
    ///
    /// The node goes with it only if this host is its current owner.
    pub fn destroy_host(&mut self, host: HostId) -> Result<bool> {
        self.hosts.destroy(host, &mut self.node)
    }

    /// Register a callback to run when the node is destroyed.
    ///
    /// Callbacks may be registered before the node is mounted.
    pub fn on_destroy(&mut self, callback: impl FnOnce() + 'static) -> Result<()> {
        self.node.ensure_not_destroyed()?;
        self.node.destroy_callbacks.push(Box::new(callback));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn setup() -> (EventLog, ViewMountManager, HostId, HostId) {
        let events = EventLog::new();
        let mut registry = HostRegistry::new(events.clone());
        let a = registry.add_host("hostA", true);
        let b = registry.add_host("hostB", true);
        (events, ViewMountManager::new(registry), a, b)
    }

    #[test]
    fn test_mount() {
        let (events, mut manager, a, _) = setup();

        let node = manager.mount(a).unwrap();

        assert_eq!(manager.state(), NodeState::Mounted(a));
        assert_eq!(manager.hosts().get(a).unwrap().contained(), Some(node));
        assert_eq!(events.events()[0].to_string(), "mounted: hostA");
    }

    #[test]
    fn test_mount_twice() {
        let (_, mut manager, a, b) = setup();
        let node = manager.mount(a).unwrap();

        assert_eq!(manager.mount(b), Err(MountError::AlreadyMounted { node }));
        assert_eq!(manager.state(), NodeState::Mounted(a));
        assert_eq!(manager.hosts().get(b).unwrap().contained(), None);
    }

    #[test]
    fn test_mount_dead_host() {
        let (_, mut manager, _, _) = setup();
        let dead = manager.add_host("dead", false);

        assert_eq!(
            manager.mount(dead),
            Err(MountError::DeadHost { host: "dead".into() })
        );
        assert_eq!(manager.state(), NodeState::Unmounted);
        assert!(manager.node().is_none());
    }

    #[test]
    fn test_mount_occupied_host() {
        let (events, mut manager, a, b) = setup();
        manager.hosts.set_contained(a, Some(NodeId(5)));

        assert_eq!(
            manager.mount(a),
            Err(MountError::InvalidTarget { host: "hostA".into() })
        );
        assert_eq!(manager.state(), NodeState::Unmounted);
        assert!(events.is_empty());
        assert_eq!(manager.hosts().get(b).unwrap().contained(), None);
    }

    #[test]
    fn test_move_transfers_ownership() {
        let (_, mut manager, a, b) = setup();
        let node = manager.mount(a).unwrap();

        manager.move_to(b).unwrap();

        assert_eq!(manager.owner(), Some(b));
        assert_eq!(manager.node().unwrap().id(), node);
        assert_eq!(manager.hosts().get(a).unwrap().contained(), None);
        assert_eq!(manager.hosts().get(b).unwrap().contained(), Some(node));
    }

    #[test]
    fn test_move_errors() {
        let (_, mut manager, a, b) = setup();
        assert_eq!(manager.move_to(b), Err(MountError::NoNodeMounted));

        manager.mount(a).unwrap();
        assert_eq!(
            manager.move_to(a),
            Err(MountError::InvalidTarget { host: "hostA".into() })
        );
        assert!(matches!(
            manager.move_to(HostId(9)),
            Err(MountError::UnknownHost(_))
        ));

        manager.destroy_host(b).unwrap();
        assert_eq!(
            manager.move_to(b),
            Err(MountError::DeadHost { host: "hostB".into() })
        );
        assert_eq!(manager.owner(), Some(a));
    }

    #[test]
    fn test_former_owner_destroyed() {
        let (events, mut manager, a, b) = setup();
        manager.mount(a).unwrap();
        manager.move_to(b).unwrap();

        manager.destroy_host(a).unwrap();
        assert_eq!(manager.state(), NodeState::Mounted(b));
        assert!(events.destroyed_events().is_empty());

        manager.destroy_host(b).unwrap();
        assert_eq!(manager.state(), NodeState::Destroyed);
        let destroyed = events.destroyed_events();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].to_string(), "destroyed: hostB");
    }

    #[test]
    fn test_owner_never_outlives_its_host() {
        let (events, mut manager, a, b) = setup();
        manager.mount(a).unwrap();

        manager.destroy_host(a).unwrap();

        assert_eq!(manager.owner(), None);
        assert!(manager.hosts().occupied_hosts().next().is_none());
        assert_eq!(
            manager.move_to(b),
            Err(MountError::NodeDestroyed { node: NODE_ID })
        );
        assert_eq!(events.destroyed_events().len(), 1);
    }

    #[test]
    fn test_destroyed_node_rejects_operations() {
        let (_, mut manager, a, b) = setup();
        let node = manager.mount(a).unwrap();
        manager.destroy_host(a).unwrap();

        assert_eq!(manager.move_to(b), Err(MountError::NodeDestroyed { node }));
        assert_eq!(manager.mount(b), Err(MountError::NodeDestroyed { node }));
        assert_eq!(
            manager.on_destroy(|| {}),
            Err(MountError::NodeDestroyed { node })
        );
        assert_eq!(manager.mounted_owner(), Err(MountError::NodeDestroyed { node }));
    }

    #[test]
    fn test_destroy_callback() {
        let (_, mut manager, a, b) = setup();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        manager
            .on_destroy(move || calls_clone.set(calls_clone.get() + 1))
            .unwrap();
        manager.mount(a).unwrap();

        manager.destroy_host(b).unwrap();
        assert_eq!(calls.get(), 0);

        assert_eq!(manager.destroy_host(a), Ok(true));
        assert_eq!(manager.destroy_host(a), Ok(false));
        assert_eq!(calls.get(), 1);
    }
}
