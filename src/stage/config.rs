//! Stage configuration.

use crate::types::EventKind;

/// How a [`Stage`](super::Stage) is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    /// Host names, in order. Every host starts alive.
    pub hosts: Vec<String>,
    /// Mount the node into the first host on creation.
    pub auto_mount: bool,
    /// Event kinds the stage's log records.
    pub event_filter: EventKind,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["Container 1".to_string(), "Container 2".to_string()],
            auto_mount: true,
            event_filter: EventKind::ALL,
        }
    }
}

impl StageConfig {
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auto_mount(mut self, auto_mount: bool) -> Self {
        self.auto_mount = auto_mount;
        self
    }

    pub fn with_event_filter(mut self, filter: EventKind) -> Self {
        self.event_filter = filter;
        self
    }
}
