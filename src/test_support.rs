//! Test doubles shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::balancer::Balancer;
use crate::cluster::{Context, Node};
use crate::connector::{ConnectTarget, Connector};
use crate::error::{BalancerError, BalancerResult, ConnectError};

#[derive(Debug)]
pub struct MockHandle {
    pub url: String,
    pub driver: String,
    pub max_idle_connections: Option<usize>,
    pub serial: usize,
}

/// Connector that counts open attempts and can be told to fail per url.
#[derive(Debug, Default)]
pub struct MockConnector {
    opens: AtomicUsize,
    failing: Mutex<HashSet<String>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn fail_url(&self, url: &str) {
        self.failing.lock().insert(url.to_string());
    }

    pub fn heal_url(&self, url: &str) {
        self.failing.lock().remove(url);
    }
}

impl Connector for MockConnector {
    type Handle = Arc<MockHandle>;

    fn open(&self, target: &ConnectTarget<'_>) -> Result<Self::Handle, ConnectError> {
        let serial = self.opens.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().contains(target.url) {
            return Err(format!("dummy driver refused {}", target.url).into());
        }
        Ok(Arc::new(MockHandle {
            url: target.url.to_string(),
            driver: target.driver.to_string(),
            max_idle_connections: target.max_idle_connections,
            serial,
        }))
    }
}

/// Balancer that records added urls and always serves the last added node.
pub struct RecordingBalancer<C: Connector> {
    pub added: Arc<Mutex<Vec<String>>>,
    last: Option<Arc<Node<C>>>,
}

impl<C: Connector> Default for RecordingBalancer<C> {
    fn default() -> Self {
        Self {
            added: Arc::default(),
            last: None,
        }
    }
}

impl<C: Connector> Balancer<C> for RecordingBalancer<C> {
    fn add(&mut self, node: Arc<Node<C>>) -> BalancerResult<()> {
        self.added.lock().push(node.url().to_string());
        self.last = Some(node);
        Ok(())
    }

    fn acquire(&self, _ctx: &mut Context) -> BalancerResult<C::Handle> {
        self.last.as_ref().ok_or(BalancerError::NoNodes)?.open()
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub fn counts_by_url(handles: &[Arc<MockHandle>]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for handle in handles {
        *counts.entry(handle.url.clone()).or_insert(0) += 1;
    }
    counts
}
