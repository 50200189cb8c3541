//! Multiple readers, single writer strategy.
//!
//! Nodes are partitioned by declared mode as they are added. Reads draw
//! uniformly among the readers, writes always go to the writer.

use std::sync::Arc;

use crate::balancer::{Balancer, RandomSource};
use crate::cluster::{Context, Mode, Node};
use crate::connector::Connector;
use crate::error::{BalancerError, BalancerResult};

pub struct ReadWriteBalancer<C: Connector> {
    readers: Vec<Arc<Node<C>>>,
    writer: Option<Arc<Node<C>>>,
    source: RandomSource,
}

impl<C: Connector> ReadWriteBalancer<C> {
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    pub fn with_source(source: RandomSource) -> Self {
        Self {
            readers: Vec::new(),
            writer: None,
            source,
        }
    }

    pub fn readers(&self) -> &[Arc<Node<C>>] {
        &self.readers
    }

    pub fn writer(&self) -> Option<&Arc<Node<C>>> {
        self.writer.as_ref()
    }

    fn reader(&self) -> BalancerResult<&Arc<Node<C>>> {
        let index = self.source.pick(self.readers.len()).ok_or(BalancerError::NoReaders)?;
        Ok(&self.readers[index])
    }
}

impl<C: Connector> Default for ReadWriteBalancer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Balancer<C> for ReadWriteBalancer<C> {
    fn add(&mut self, node: Arc<Node<C>>) -> BalancerResult<()> {
        match node.mode() {
            Mode::Read => self.readers.push(node),
            Mode::Write => {
                if let Some(previous) = self.writer.replace(node) {
                    tracing::debug!(url = %previous.url(), "Writer node replaced");
                }
            }
            mode => {
                return Err(BalancerError::InvalidNodeMode {
                    url: node.url().to_string(),
                    mode,
                })
            }
        }
        Ok(())
    }

    fn acquire(&self, ctx: &mut Context) -> BalancerResult<C::Handle> {
        let node = match ctx.mode {
            Mode::Read => self.reader()?,
            Mode::Write => self.writer.as_ref().ok_or(BalancerError::NoWriter)?,
            mode => return Err(BalancerError::InvalidRequestMode(mode)),
        };
        tracing::trace!(url = %node.url(), mode = %ctx.mode, "Selected node by mode");
        node.open()
    }

    fn name(&self) -> &'static str {
        "read_write"
    }
}
