//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! cluster + balancer produce:
//!     → tracing events (debug/trace, structured fields)
//!     → metrics.rs (acquisition and handle-open counters)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder itself
//! - Acquisition errors are returned, not logged

pub mod logging;
pub mod metrics;
