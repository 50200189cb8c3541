//! Cluster subsystem.
//!
//! # Data Flow
//! ```text
//! Caller builds Node values
//!     → registry.rs (Cluster::add appends, then notifies the strategy)
//!
//! Caller builds a Context per request
//!     → registry.rs (Cluster::acquire)
//!     → balancer (pick one node)
//!     → node.rs (open handle once, reuse afterwards)
//!     → connection handle or error
//! ```
//!
//! # Design Decisions
//! - Registration is a single-threaded setup phase
//! - Acquisition only reads the registry; the handle cache is locked per node
//! - Nodes never change role or address after registration

pub mod context;
pub mod node;
pub mod registry;

pub use context::Context;
pub use node::{Mode, Node};
pub use registry::{Cluster, ClusterSettings, NodeList};
