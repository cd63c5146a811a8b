//! Errors returned by mount operations.
//!
//! Every variant is a precondition failure. The operation that returns one
//! has left all state untouched.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// `mount` was called while a node already exists.
    #[error("{node} is already mounted")]
    AlreadyMounted { node: NodeId },

    /// The host has been destroyed and cannot receive the node.
    #[error("host {host} is destroyed")]
    DeadHost { host: String },

    /// `move_to` was called before anything was mounted.
    #[error("no node is mounted")]
    NoNodeMounted,

    /// The target already holds a node, or there is nowhere else to move it.
    #[error("invalid move target: {host}")]
    InvalidTarget { host: String },

    /// The node reached its terminal state.
    #[error("{node} is destroyed")]
    NodeDestroyed { node: NodeId },

    /// There is no live host to mount into.
    #[error("no live host")]
    NoLiveHost,

    /// No host with this id or name is registered.
    #[error("unknown host: {0}")]
    UnknownHost(String),
}

pub type Result<T, E = MountError> = std::result::Result<T, E>;
