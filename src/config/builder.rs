//! Cluster construction from configuration.

use regex::Regex;

use crate::balancer;
use crate::cluster::{Cluster, ClusterSettings, Node};
use crate::config::loader::ConfigError;
use crate::config::schema::BalancerConfig;
use crate::config::validation::ValidationError;
use crate::connector::Connector;

impl<C: Connector> Cluster<C> {
    /// Build a cluster from a configuration.
    ///
    /// The strategy is installed before any node is added.
    pub fn from_config(config: &BalancerConfig, connector: C) -> Result<Self, ConfigError> {
        let strategy = &config.cluster.strategy;
        let balancer = balancer::from_name(strategy, config.cluster.seed)
            .ok_or_else(|| ConfigError::Validation(vec![ValidationError::UnknownStrategy(strategy.clone())]))?;

        let settings = ClusterSettings::new(connector).with_max_idle_connections(config.cluster.max_idle_connections);
        let mut cluster = Cluster::with_settings(settings);
        cluster.set_boxed_balancer(balancer);

        for (index, node_config) in config.nodes.iter().enumerate() {
            let mut node = Node::new(&node_config.url, &node_config.driver)
                .with_mode(node_config.mode)
                .with_values(node_config.values.clone());
            if let Some(pattern) = &node_config.pattern {
                let re = Regex::new(pattern).map_err(|e| {
                    ConfigError::Validation(vec![ValidationError::InvalidPattern {
                        index,
                        reason: e.to_string(),
                    }])
                })?;
                node = node.with_pattern(re);
            }
            cluster.add(node)?;
        }

        tracing::info!(
            strategy = %strategy,
            nodes = config.nodes.len(),
            max_idle_connections = config.cluster.max_idle_connections,
            "Cluster built"
        );
        Ok(cluster)
    }
}
