//! Database client seam.
//!
//! # Responsibilities
//! - Define the one call the core makes into a database client library
//! - Provide a dry-run connector for the CLI
//!
//! # Design Decisions
//! - Handles are opaque to the core; they only need to be cheap to clone
//! - Pooling behind a handle belongs to the client library

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::error::ConnectError;

/// Everything a connector needs to open a handle for one node.
#[derive(Debug, Clone, Copy)]
pub struct ConnectTarget<'a> {
    /// Connection address, as registered on the node.
    pub url: &'a str,
    /// Driver identifier, e.g. "postgres".
    pub driver: &'a str,
    /// Cluster-wide idle connection limit, if one was configured.
    pub max_idle_connections: Option<usize>,
}

/// Opens connection handles for nodes.
pub trait Connector: Send + Sync + 'static {
    /// A live, reusable handle. Clones must refer to the same underlying pool.
    type Handle: Clone + Send + Sync + 'static;

    /// Open a handle for the given target.
    fn open(&self, target: &ConnectTarget<'_>) -> Result<Self::Handle, ConnectError>;
}

impl<C: Connector> Connector for Arc<C> {
    type Handle = C::Handle;

    fn open(&self, target: &ConnectTarget<'_>) -> Result<Self::Handle, ConnectError> {
        (**self).open(target)
    }
}

/// Parsed description of an endpoint, returned by [`DsnConnector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dsn {
    pub driver: String,
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub max_idle_connections: Option<usize>,
}

/// Connector that validates addresses without touching the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct DsnConnector;

impl DsnConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for DsnConnector {
    type Handle = Arc<Dsn>;

    fn open(&self, target: &ConnectTarget<'_>) -> Result<Self::Handle, ConnectError> {
        if target.driver.is_empty() {
            return Err("driver must not be empty".into());
        }
        let url = Url::parse(target.url)?;
        let host = url
            .host_str()
            .ok_or_else(|| format!("address '{}' has no host", target.url))?;

        Ok(Arc::new(Dsn {
            driver: target.driver.to_string(),
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
            database: url.path().trim_start_matches('/').to_string(),
            max_idle_connections: target.max_idle_connections,
        }))
    }
}
