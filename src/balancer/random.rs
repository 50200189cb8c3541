//! Uniform random load balancing strategy.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::balancer::Balancer;
use crate::cluster::{Context, Node, NodeList};
use crate::connector::Connector;
use crate::error::{BalancerError, BalancerResult};

/// Owned random number source shared by the random-draw strategies.
pub struct RandomSource {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic source for reproducible selection.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero.
    pub fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.lock().gen_range(0..len))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}

/// Picks a node uniformly at random, ignoring node modes.
///
/// Reads the cluster's live node list at acquisition time, so `add` keeps no
/// copy of its own.
#[derive(Debug)]
pub struct RandomBalancer<C: Connector> {
    nodes: NodeList<C>,
    source: RandomSource,
}

impl<C: Connector> RandomBalancer<C> {
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    pub fn with_source(source: RandomSource) -> Self {
        Self {
            nodes: NodeList::new(),
            source,
        }
    }
}

impl<C: Connector> Default for RandomBalancer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Balancer<C> for RandomBalancer<C> {
    fn add(&mut self, _node: Arc<Node<C>>) -> BalancerResult<()> {
        Ok(())
    }

    fn acquire(&self, _ctx: &mut Context) -> BalancerResult<C::Handle> {
        let nodes = self.nodes.to_vec();
        let index = self.source.pick(nodes.len()).ok_or(BalancerError::NoNodes)?;
        let node = &nodes[index];
        tracing::trace!(url = %node.url(), index, "Selected node at random");
        node.open()
    }

    fn bind_cluster(&mut self, nodes: NodeList<C>) {
        self.nodes = nodes;
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
