//! Read/write aware database load balancing.
//!
//! A [`Cluster`] holds a set of database [`Node`]s and one [`Balancer`]
//! strategy. Each [`Cluster::acquire`] call hands a [`Context`] to the
//! strategy, which picks a node and returns that node's lazily opened handle.
//!
//! ```rust,no_run
//! use sqlbalance::{Cluster, Context, DsnConnector, Mode, Node, ParsingBalancer};
//!
//! # fn main() -> Result<(), sqlbalance::BalancerError> {
//! let mut cluster = Cluster::new(DsnConnector::new());
//! cluster.set_balancer(ParsingBalancer::new());
//! cluster.add(Node::new("postgres://primary:5432/app", "postgres").with_mode(Mode::Write))?;
//! cluster.add(Node::new("postgres://standby:5432/app", "postgres").with_mode(Mode::Read))?;
//!
//! let handle = cluster.acquire(&mut Context::with_sql("select /* mode: write */ bump_counter()"))?;
//! assert_eq!(handle.host, "primary");
//! # Ok(())
//! # }
//! ```

pub mod balancer;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod connector;
pub mod error;
pub mod observability;

#[cfg(test)]
pub(crate) mod test_support;

pub use balancer::{Balancer, ParsingBalancer, PatternBalancer, RandomBalancer, RandomSource, ReadWriteBalancer, RoundRobinBalancer};
pub use classify::{PrefixClassifier, SqlClassifier};
pub use cluster::{Cluster, ClusterSettings, Context, Mode, Node};
pub use config::BalancerConfig;
pub use connector::{ConnectTarget, Connector, Dsn, DsnConnector};
pub use error::{BalancerError, BalancerResult, ConnectError};
