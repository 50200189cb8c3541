//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Cluster::add(node)
//!     → Balancer::add (partition or ignore)
//!
//! Cluster::acquire(ctx)
//!     → Apply the active strategy:
//!         - random.rs (uniform over every node)
//!         - round_robin.rs (rotate over every node)
//!         - read_write.rs (readers by random draw, single writer)
//!         - parsing.rs (classify ctx.sql, then read_write.rs)
//!         - pattern.rs (nodes whose pattern matches ctx.sql)
//!     → Node::open
//!     → Return handle or error
//! ```
//!
//! # Design Decisions
//! - Strategies never retry or fall back to another node when open fails
//! - Acquisition is read-only over strategy state, so `&self` suffices
//! - Random draws come from an owned, injectable source

pub mod parsing;
pub mod pattern;
pub mod random;
pub mod read_write;
pub mod round_robin;

use std::sync::Arc;

use crate::cluster::{Context, Node, NodeList};
use crate::connector::Connector;
use crate::error::BalancerResult;

pub use parsing::ParsingBalancer;
pub use pattern::PatternBalancer;
pub use random::{RandomBalancer, RandomSource};
pub use read_write::ReadWriteBalancer;
pub use round_robin::RoundRobinBalancer;

/// A strategy that maps a request context to one node's handle.
pub trait Balancer<C: Connector>: Send + Sync {
    /// Register a node with the strategy's internal view.
    fn add(&mut self, node: Arc<Node<C>>) -> BalancerResult<()>;

    /// Pick a node for the context and return its open handle.
    fn acquire(&self, ctx: &mut Context) -> BalancerResult<C::Handle>;

    /// Called when the strategy is installed on a cluster.
    fn bind_cluster(&mut self, _nodes: NodeList<C>) {}

    /// Strategy name for logging and metrics.
    fn name(&self) -> &'static str;
}

/// Strategy names accepted in configuration files.
pub const STRATEGY_NAMES: &[&str] = &["random", "round_robin", "read_write", "parsing", "pattern"];

/// Build a strategy from its configured name.
pub fn from_name<C: Connector>(name: &str, seed: Option<u64>) -> Option<Box<dyn Balancer<C>>> {
    let source = || match seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };
    let balancer: Box<dyn Balancer<C>> = match name {
        "random" => Box::new(RandomBalancer::with_source(source())),
        "round_robin" => Box::new(RoundRobinBalancer::new()),
        "read_write" => Box::new(ReadWriteBalancer::with_source(source())),
        "parsing" => Box::new(ParsingBalancer::with_source(source())),
        "pattern" => Box::new(PatternBalancer::with_source(source())),
        _ => return None,
    };
    Some(balancer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockConnector;

    #[test]
    fn test_from_name() {
        for name in STRATEGY_NAMES {
            let balancer = from_name::<MockConnector>(name, Some(7)).unwrap();
            assert_eq!(balancer.name(), *name);
        }
        assert!(from_name::<MockConnector>("weighted", None).is_none());
    }
}
