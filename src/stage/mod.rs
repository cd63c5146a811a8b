//! Stage - Drives the engine by host name.
//!
//! A stage builds a [`HostRegistry`] from its config, hands it to a
//! [`ViewMountManager`], keeps the shared [`EventLog`], and exposes the
//! driver operations by host name: mount, move and destroy.
//!
//! # Example
//!
//! ```ignore
//! use spark_remount::{Stage, StageConfig};
//!
//! // "Container 1" and "Container 2", node mounted into the first
//! let mut stage = Stage::new(StageConfig::default())?;
//!
//! stage.move_to_last()?;           // node now lives in "Container 2"
//! stage.destroy("Container 1")?;   // node survives
//! stage.destroy("Container 2")?;   // "destroyed: Container 2"
//! ```

mod config;

pub use config::StageConfig;

use crate::engine::{EventLog, HostRegistry, ViewMountManager};
use crate::error::{MountError, Result};
use crate::types::{HostId, NodeId, NodeState};

#[derive(Debug)]
pub struct Stage {
    manager: ViewMountManager,
    events: EventLog,
}

impl Stage {
    /// Build a stage from `config`.
    ///
    /// Fails only if `auto_mount` is set and there is no host to mount into.
    pub fn new(config: StageConfig) -> Result<Self> {
        let events = EventLog::with_filter(config.event_filter);
        let mut registry = HostRegistry::new(events.clone());
        for name in &config.hosts {
            registry.add_host(name.clone(), true);
        }

        let mut stage = Self {
            manager: ViewMountManager::new(registry),
            events,
        };
        if config.auto_mount {
            stage.attach_to_first()?;
        }
        Ok(stage)
    }

    /// Mount the node into the first live host.
    pub fn attach_to_first(&mut self) -> Result<NodeId> {
        let first = self
            .registry()
            .live_hosts()
            .next()
            .map(|slot| slot.id())
            .ok_or(MountError::NoLiveHost)?;
        self.manager.mount(first)
    }

    pub fn mount(&mut self, host: &str) -> Result<NodeId> {
        let id = self.resolve(host)?;
        self.manager.mount(id)
    }

    pub fn move_to(&mut self, host: &str) -> Result<()> {
        let id = self.resolve(host)?;
        self.manager.move_to(id)
    }

    /// Move the node into the last live host.
    ///
    /// Rejected unless at least two hosts are alive.
    pub fn move_to_last(&mut self) -> Result<()> {
        let owner = self.manager.mounted_owner()?;

        let live: Vec<HostId> = self.registry().live_hosts().map(|slot| slot.id()).collect();
        let target = match live.as_slice() {
            [_, .., last] => *last,
            _ => {
                return Err(MountError::InvalidTarget {
                    host: self.host_name(owner),
                });
            }
        };
        self.manager.move_to(target)
    }

    /// Destroy a host. Returns `false` if it was already dead.
    pub fn destroy(&mut self, host: &str) -> Result<bool> {
        let id = self.resolve(host)?;
        self.manager.destroy_host(id)
    }

    pub fn state(&self) -> NodeState {
        self.manager.state()
    }

    /// Name of the current owner, if any.
    pub fn owner_name(&self) -> Option<&str> {
        let owner = self.manager.owner()?;
        self.registry().get(owner).map(|slot| slot.name())
    }

    pub fn registry(&self) -> &HostRegistry {
        self.manager.hosts()
    }

    pub fn manager(&self) -> &ViewMountManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ViewMountManager {
        &mut self.manager
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn resolve(&self, host: &str) -> Result<HostId> {
        self.registry()
            .find(host)
            .ok_or_else(|| MountError::UnknownHost(host.to_string()))
    }

    fn host_name(&self, id: HostId) -> String {
        self.registry()
            .get(id)
            .map(|slot| slot.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
