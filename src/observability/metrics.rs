//! Metrics collection.
//!
//! # Metrics
//! - `sqlbalance_acquire_total` (counter): acquisitions by strategy, outcome
//! - `sqlbalance_node_open_total` (counter): handle opens by driver, outcome

use metrics::counter;

fn outcome(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "error"
    }
}

/// Record one `Cluster::acquire` call.
pub fn record_acquire(strategy: &'static str, ok: bool) {
    counter!("sqlbalance_acquire_total", "strategy" => strategy, "outcome" => outcome(ok)).increment(1);
}

/// Record one attempt to open a node's handle.
pub fn record_node_open(driver: &str, ok: bool) {
    counter!("sqlbalance_node_open_total", "driver" => driver.to_string(), "outcome" => outcome(ok)).increment(1);
}
