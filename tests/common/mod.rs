//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sqlbalance::{ConnectError, ConnectTarget, Connector, Mode, Node};

/// Handle produced by [`CountingConnector`].
#[derive(Debug)]
pub struct TestHandle {
    pub url: String,
    pub serial: usize,
}

/// Connector that counts opens and can stall each open to widen races.
#[derive(Debug, Default)]
pub struct CountingConnector {
    opens: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            opens: AtomicUsize::new(0),
            delay: Some(delay),
        })
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl Connector for CountingConnector {
    type Handle = Arc<TestHandle>;

    fn open(&self, target: &ConnectTarget<'_>) -> Result<Self::Handle, ConnectError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if target.url.starts_with("down://") {
            return Err(format!("connection refused: {}", target.url).into());
        }
        let serial = self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TestHandle {
            url: target.url.to_string(),
            serial,
        }))
    }
}

pub type TestNode = Node<Arc<CountingConnector>>;

#[allow(dead_code)]
pub fn reader(url: impl Into<String>) -> TestNode {
    Node::new(url, "dummy").with_mode(Mode::Read)
}

#[allow(dead_code)]
pub fn writer(url: impl Into<String>) -> TestNode {
    Node::new(url, "dummy").with_mode(Mode::Write)
}

#[allow(dead_code)]
pub fn count_urls(handles: &[Arc<TestHandle>]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for handle in handles {
        *counts.entry(handle.url.clone()).or_insert(0) += 1;
    }
    counts
}
