//! Cluster registry.
//!
//! # Responsibilities
//! - Hold the registered nodes in registration order
//! - Own the active balancing strategy
//! - Hand cluster-level connection settings to nodes

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::balancer::{random::RandomBalancer, Balancer};
use crate::cluster::{Context, Node};
use crate::connector::Connector;
use crate::error::{BalancerError, BalancerResult};
use crate::observability::metrics;

/// Cluster-level settings read by nodes when opening handles.
pub struct ClusterSettings<C> {
    connector: C,
    max_idle_connections: Option<usize>,
}

impl<C: Connector> ClusterSettings<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            max_idle_connections: None,
        }
    }

    /// Limit idle connections per node. Zero leaves the driver default.
    pub fn with_max_idle_connections(mut self, max: usize) -> Self {
        self.max_idle_connections = (max != 0).then_some(max);
        self
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn max_idle_connections(&self) -> Option<usize> {
        self.max_idle_connections
    }
}

/// Shared, ordered view of a cluster's nodes.
///
/// Strategies that select over every node keep a clone of this list instead
/// of their own copy. Writes only happen during registration.
pub struct NodeList<C: Connector>(Arc<RwLock<Vec<Arc<Node<C>>>>>);

impl<C: Connector> NodeList<C> {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(Vec::new())))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Arc<Node<C>>> {
        self.0.read().get(index).cloned()
    }

    /// Copy of the current node list.
    pub fn to_vec(&self) -> Vec<Arc<Node<C>>> {
        self.0.read().clone()
    }

    pub(crate) fn push(&self, node: Arc<Node<C>>) {
        self.0.write().push(node);
    }
}

impl<C: Connector> Default for NodeList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Clone for NodeList<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C: Connector> fmt::Debug for NodeList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.read().iter()).finish()
    }
}

/// A set of nodes addressed as a single target.
pub struct Cluster<C: Connector> {
    nodes: NodeList<C>,
    balancer: Option<Box<dyn Balancer<C>>>,
    settings: Arc<ClusterSettings<C>>,
}

impl<C: Connector> Cluster<C> {
    /// Create an empty cluster with default settings.
    pub fn new(connector: C) -> Self {
        Self::with_settings(ClusterSettings::new(connector))
    }

    pub fn with_settings(settings: ClusterSettings<C>) -> Self {
        Self {
            nodes: NodeList::new(),
            balancer: None,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ClusterSettings<C> {
        &self.settings
    }

    /// Registered nodes, in registration order.
    pub fn nodes(&self) -> Vec<Arc<Node<C>>> {
        self.nodes.to_vec()
    }

    /// Name of the active strategy, if one is installed.
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.balancer.as_ref().map(|b| b.name())
    }

    /// Add a node to the cluster.
    ///
    /// The node is always appended to the registry. The strategy is notified
    /// afterwards and may reject it; that error is returned but the node stays
    /// registered. A [`RandomBalancer`] is installed if no strategy is set.
    pub fn add(&mut self, node: Node<C>) -> BalancerResult<Arc<Node<C>>> {
        let node = Arc::new(node.bind(Arc::clone(&self.settings)));
        self.nodes.push(Arc::clone(&node));

        if self.balancer.is_none() {
            self.set_balancer(RandomBalancer::new());
        }
        if let Some(balancer) = self.balancer.as_mut() {
            balancer.add(Arc::clone(&node))?;
            tracing::trace!(url = %node.url(), mode = %node.mode(), strategy = balancer.name(), "Node added");
        }
        Ok(node)
    }

    /// Replace the active strategy.
    ///
    /// Nodes registered earlier are not replayed into the new strategy.
    pub fn set_balancer<B: Balancer<C> + 'static>(&mut self, balancer: B) {
        self.set_boxed_balancer(Box::new(balancer));
    }

    pub fn set_boxed_balancer(&mut self, mut balancer: Box<dyn Balancer<C>>) {
        balancer.bind_cluster(self.nodes.clone());
        tracing::debug!(strategy = balancer.name(), nodes = self.nodes.len(), "Balancer installed");
        self.balancer = Some(balancer);
    }

    /// Acquire a handle from the node chosen by the active strategy.
    pub fn acquire(&self, ctx: &mut Context) -> BalancerResult<C::Handle> {
        let Some(balancer) = self.balancer.as_ref() else {
            return Err(BalancerError::NoNodes);
        };
        let result = balancer.acquire(ctx);
        metrics::record_acquire(balancer.name(), result.is_ok());
        result
    }
}

impl<C: Connector> fmt::Debug for Cluster<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("nodes", &self.nodes)
            .field("strategy", &self.strategy_name())
            .field("max_idle_connections", &self.settings.max_idle_connections)
            .finish()
    }
}
