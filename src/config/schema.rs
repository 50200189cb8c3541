//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a cluster.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Mode;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BalancerConfig {
    /// Cluster-wide settings.
    pub cluster: ClusterConfig,

    /// Node definitions, in registration order.
    pub nodes: Vec<NodeConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Cluster-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Strategy name (random, round_robin, read_write, parsing, pattern).
    pub strategy: String,

    /// Maximum idle connections per node (0 = driver default).
    pub max_idle_connections: usize,

    /// Seed for the random source. Unset means seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            strategy: "random".to_string(),
            max_idle_connections: 0,
            seed: None,
        }
    }
}

/// A single database node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Connection address (e.g., "postgres://db1:5432/app").
    pub url: String,

    /// Driver identifier (e.g., "postgres", "mysql").
    pub driver: String,

    /// Declared role.
    #[serde(default)]
    pub mode: Mode,

    /// Regex routing queries to this node (pattern strategy).
    #[serde(default)]
    pub pattern: Option<String>,

    /// Arbitrary metadata.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
