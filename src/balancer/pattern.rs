//! Pattern-routed strategy.
//!
//! Nodes carrying a pattern serve the queries their pattern matches; nodes
//! without one form the fallback group. Within either group the node is drawn
//! uniformly at random.

use std::sync::Arc;

use crate::balancer::{Balancer, RandomSource};
use crate::cluster::{Context, Node};
use crate::connector::Connector;
use crate::error::{BalancerError, BalancerResult};

pub struct PatternBalancer<C: Connector> {
    routed: Vec<Arc<Node<C>>>,
    fallback: Vec<Arc<Node<C>>>,
    source: RandomSource,
}

impl<C: Connector> PatternBalancer<C> {
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    pub fn with_source(source: RandomSource) -> Self {
        Self {
            routed: Vec::new(),
            fallback: Vec::new(),
            source,
        }
    }

    fn matching(&self, sql: &str) -> Vec<&Arc<Node<C>>> {
        self.routed
            .iter()
            .filter(|node| node.pattern().is_some_and(|re| re.is_match(sql)))
            .collect()
    }
}

impl<C: Connector> Default for PatternBalancer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Balancer<C> for PatternBalancer<C> {
    fn add(&mut self, node: Arc<Node<C>>) -> BalancerResult<()> {
        if node.pattern().is_some() {
            self.routed.push(node);
        } else {
            self.fallback.push(node);
        }
        Ok(())
    }

    fn acquire(&self, ctx: &mut Context) -> BalancerResult<C::Handle> {
        let matches = self.matching(ctx.sql.as_deref().unwrap_or_default());
        let node = if matches.is_empty() {
            let index = self.source.pick(self.fallback.len()).ok_or(BalancerError::NoMatchingNode)?;
            &self.fallback[index]
        } else {
            let index = self.source.pick(matches.len()).ok_or(BalancerError::NoMatchingNode)?;
            matches[index]
        };
        tracing::trace!(url = %node.url(), matched = !matches.is_empty(), "Selected node by pattern");
        node.open()
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
