//! Concurrent acquisition against a shared cluster.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use sqlbalance::{Cluster, Context, Node, ParsingBalancer};

mod common;
use common::{reader, writer, CountingConnector};

const THREADS: usize = 16;

#[test]
fn test_concurrent_first_open_creates_one_handle() {
    let connector = CountingConnector::slow(Duration::from_millis(20));
    let mut c = Cluster::new(connector.clone());
    c.add(Node::new("only", "dummy")).unwrap();

    let barrier = Barrier::new(THREADS);
    let handles: Vec<_> = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    c.acquire(&mut Context::new()).unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(connector.open_count(), 1);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
}

#[test]
fn test_concurrent_mixed_acquisitions() {
    let connector = CountingConnector::new();
    let mut c = Cluster::new(connector.clone());
    c.set_balancer(ParsingBalancer::new());
    for i in 0..4 {
        c.add(reader(format!("standby-{i}"))).unwrap();
    }
    c.add(writer("primary")).unwrap();

    let barrier = Barrier::new(THREADS);
    thread::scope(|s| {
        for t in 0..THREADS {
            let (c, barrier) = (&c, &barrier);
            s.spawn(move || {
                barrier.wait();
                for i in 0..1_000 {
                    let sql = if (t + i) % 3 == 0 { "update t set x = 1" } else { "select * from t" };
                    let handle = c.acquire(&mut Context::with_sql(sql)).unwrap();
                    assert_eq!(handle.url == "primary", sql.starts_with("update"));
                }
            });
        }
    });

    assert!(connector.open_count() <= 5);
    let serials: std::collections::HashSet<_> = c
        .nodes()
        .iter()
        .filter(|n| n.is_open())
        .map(|n| n.open().unwrap().serial)
        .collect();
    assert_eq!(serials.len(), connector.open_count());
}
