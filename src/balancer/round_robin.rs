//! Round-robin load balancing strategy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::balancer::Balancer;
use crate::cluster::{Context, Node, NodeList};
use crate::connector::Connector;
use crate::error::{BalancerError, BalancerResult};

/// Round-robin selector.
/// Stores an internal counter to rotate through the cluster's nodes.
pub struct RoundRobinBalancer<C: Connector> {
    nodes: NodeList<C>,
    counter: AtomicUsize,
}

impl<C: Connector> RoundRobinBalancer<C> {
    pub fn new() -> Self {
        Self {
            nodes: NodeList::new(),
            counter: AtomicUsize::new(0),
        }
    }
}

impl<C: Connector> Default for RoundRobinBalancer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Balancer<C> for RoundRobinBalancer<C> {
    fn add(&mut self, _node: Arc<Node<C>>) -> BalancerResult<()> {
        Ok(())
    }

    fn acquire(&self, _ctx: &mut Context) -> BalancerResult<C::Handle> {
        let nodes = self.nodes.to_vec();
        if nodes.is_empty() {
            return Err(BalancerError::NoNodes);
        }
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % nodes.len();
        nodes[index].open()
    }

    fn bind_cluster(&mut self, nodes: NodeList<C>) {
        self.nodes = nodes;
        self.counter.store(0, Ordering::Relaxed);
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use crate::test_support::MockConnector;

    #[test]
    fn test_round_robin() {
        let mut c = Cluster::new(Arc::new(MockConnector::new()));
        c.set_balancer(RoundRobinBalancer::new());
        c.add(Node::new("1", "dummy")).unwrap();
        c.add(Node::new("2", "dummy")).unwrap();

        let mut ctx = Context::new();
        let urls: Vec<_> = (0..3).map(|_| c.acquire(&mut ctx).unwrap().url.clone()).collect();
        assert_eq!(urls, vec!["1", "2", "1"]);
    }

    #[test]
    fn test_round_robin_empty() {
        let balancer: RoundRobinBalancer<MockConnector> = RoundRobinBalancer::new();
        assert!(matches!(balancer.acquire(&mut Context::new()), Err(BalancerError::NoNodes)));
    }
}
