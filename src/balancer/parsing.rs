//! Read/write split driven by the query text.

use std::sync::Arc;

use crate::balancer::{Balancer, RandomSource, ReadWriteBalancer};
use crate::classify::{PrefixClassifier, SqlClassifier};
use crate::cluster::{Context, Node};
use crate::connector::Connector;
use crate::error::BalancerResult;

/// Classifies `Context::sql`, stores the result in `Context::mode` and then
/// selects exactly like [`ReadWriteBalancer`].
pub struct ParsingBalancer<C: Connector> {
    inner: ReadWriteBalancer<C>,
    classifier: Box<dyn SqlClassifier>,
}

impl<C: Connector> ParsingBalancer<C> {
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    pub fn with_source(source: RandomSource) -> Self {
        Self {
            inner: ReadWriteBalancer::with_source(source),
            classifier: Box::new(PrefixClassifier::new()),
        }
    }

    /// Replace the classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn SqlClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn inner(&self) -> &ReadWriteBalancer<C> {
        &self.inner
    }
}

impl<C: Connector> Default for ParsingBalancer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Balancer<C> for ParsingBalancer<C> {
    fn add(&mut self, node: Arc<Node<C>>) -> BalancerResult<()> {
        self.inner.add(node)
    }

    fn acquire(&self, ctx: &mut Context) -> BalancerResult<C::Handle> {
        ctx.mode = self.classifier.classify(ctx.sql.as_deref().unwrap_or_default());
        tracing::trace!(mode = %ctx.mode, classifier = ?self.classifier, "Classified query");
        self.inner.acquire(ctx)
    }

    fn name(&self) -> &'static str {
        "parsing"
    }
}
