//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BalancerConfig (validated, immutable)
//!     → builder.rs (strategy first, then nodes in file order)
//!     → Cluster
//! ```
//!
//! # Design Decisions
//! - Config is read once; nodes never change after the cluster is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod builder;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BalancerConfig, ClusterConfig, NodeConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
