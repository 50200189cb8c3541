//! Node abstraction.
//!
//! # Responsibilities
//! - Represent a single physical database endpoint
//! - Carry the declared role used by read/write strategies
//! - Lazily open and cache the node's connection handle

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cluster::registry::ClusterSettings;
use crate::connector::{ConnectTarget, Connector};
use crate::error::{BalancerError, BalancerResult};
use crate::observability::metrics;

/// Read/write role of a node, or the intent of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Unspecified,
    Read,
    Write,
    /// Produced when query text cannot be mapped to read or write.
    Unclassified,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Unspecified => "unspecified",
            Mode::Read => "read",
            Mode::Write => "write",
            Mode::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single database endpoint participating in a cluster.
///
/// Address, driver and mode are fixed at construction. Once the node is added
/// to a [`Cluster`](crate::cluster::Cluster) it is shared behind an `Arc` and
/// only its handle cache changes.
pub struct Node<C: Connector> {
    url: String,
    driver: String,
    mode: Mode,
    values: HashMap<String, String>,
    pattern: Option<Regex>,

    /// Settings of the owning cluster, set on registration.
    cluster: Option<Arc<ClusterSettings<C>>>,
    /// Cached handle. The lock is held across the open call so at most one
    /// handle is ever created.
    handle: Mutex<Option<C::Handle>>,
}

impl<C: Connector> Node<C> {
    /// Create a node for the given address and driver with no declared mode.
    pub fn new(url: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            driver: driver.into(),
            mode: Mode::Unspecified,
            values: HashMap::new(),
            pattern: None,
            cluster: None,
            handle: Mutex::new(None),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_values(mut self, values: HashMap<String, String>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Look up a metadata value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// True once a handle has been opened and cached.
    pub fn is_open(&self) -> bool {
        self.handle.lock().is_some()
    }

    pub(crate) fn bind(mut self, settings: Arc<ClusterSettings<C>>) -> Self {
        self.cluster = Some(settings);
        self
    }

    /// Return the node's handle, opening it on first use.
    ///
    /// A failed open leaves the cache empty so a later call can retry.
    pub fn open(&self) -> BalancerResult<C::Handle> {
        let settings = self.cluster.as_ref().ok_or_else(|| BalancerError::Unbound {
            url: self.url.clone(),
        })?;

        let mut slot = self.handle.lock();
        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        let target = ConnectTarget {
            url: &self.url,
            driver: &self.driver,
            max_idle_connections: settings.max_idle_connections(),
        };
        let handle = match settings.connector().open(&target) {
            Ok(handle) => handle,
            Err(source) => {
                metrics::record_node_open(&self.driver, false);
                return Err(BalancerError::Connect {
                    url: self.url.clone(),
                    driver: self.driver.clone(),
                    source,
                });
            }
        };
        metrics::record_node_open(&self.driver, true);
        tracing::debug!(
            url = %self.url,
            driver = %self.driver,
            mode = %self.mode,
            max_idle_connections = ?target.max_idle_connections,
            "Opened node connection handle"
        );

        *slot = Some(handle.clone());
        Ok(handle)
    }
}

impl<C: Connector> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("url", &self.url)
            .field("driver", &self.driver)
            .field("mode", &self.mode)
            .field("values", &self.values)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("open", &self.is_open())
            .finish()
    }
}
