//! Error types shared by the cluster and balancer subsystems.

use thiserror::Error;

use crate::cluster::Mode;

/// Boxed error returned by a [`Connector`](crate::connector::Connector).
pub type ConnectError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by `Cluster::add` and `Cluster::acquire`.
#[derive(Debug, Error)]
pub enum BalancerError {
    /// A node was registered with a mode the strategy cannot place.
    #[error("node {url} has unknown or invalid mode '{mode}', expected 'read' or 'write'")]
    InvalidNodeMode { url: String, mode: Mode },

    /// The context carried a mode the strategy does not serve.
    #[error("unknown value for context mode, expected 'read' or 'write', was '{0}'")]
    InvalidRequestMode(Mode),

    /// The cluster has no nodes to select from.
    #[error("no nodes registered in cluster")]
    NoNodes,

    /// A read was requested but no reader was registered.
    #[error("no reader nodes registered")]
    NoReaders,

    /// A write was requested but no writer was registered.
    #[error("no writer node registered")]
    NoWriter,

    /// Neither a pattern node nor a fallback node could serve the query.
    #[error("no node matches the query and no fallback node is registered")]
    NoMatchingNode,

    /// The node was opened before being added to a cluster.
    #[error("node {url} is not registered with a cluster")]
    Unbound { url: String },

    /// The underlying database client failed to open a handle.
    #[error("failed to open {driver} connection to {url}: {source}")]
    Connect {
        url: String,
        driver: String,
        #[source]
        source: ConnectError,
    },
}

/// Result alias for balancer operations.
pub type BalancerResult<T> = Result<T, BalancerError>;
