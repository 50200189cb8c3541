//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check node addresses and patterns
//! - Check the node set fits the chosen strategy
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BalancerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::balancer::STRATEGY_NAMES;
use crate::cluster::Mode;
use crate::config::schema::BalancerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("node {index}: url must not be empty")]
    EmptyUrl { index: usize },

    #[error("node {index}: invalid url '{url}': {reason}")]
    InvalidUrl { index: usize, url: String, reason: String },

    #[error("node {index}: driver must not be empty")]
    EmptyDriver { index: usize },

    #[error("node {index}: invalid pattern: {reason}")]
    InvalidPattern { index: usize, reason: String },

    #[error("node {index}: mode must be 'read' or 'write' for strategy '{strategy}', was '{mode}'")]
    InvalidMode { index: usize, strategy: String, mode: Mode },

    #[error("strategy '{strategy}' requires exactly one writer, found {found}")]
    WriterCount { strategy: String, found: usize },

    #[error("strategy '{0}' requires at least one reader")]
    NoReaders(String),

    #[error("strategy '{0}' requires at least one node")]
    NoNodes(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let strategy = config.cluster.strategy.as_str();

    if !STRATEGY_NAMES.contains(&strategy) {
        errors.push(ValidationError::UnknownStrategy(strategy.to_string()));
    }

    for (index, node) in config.nodes.iter().enumerate() {
        if node.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl { index });
        } else if let Err(e) = Url::parse(&node.url) {
            errors.push(ValidationError::InvalidUrl {
                index,
                url: node.url.clone(),
                reason: e.to_string(),
            });
        }

        if node.driver.trim().is_empty() {
            errors.push(ValidationError::EmptyDriver { index });
        }

        if let Some(pattern) = &node.pattern {
            if let Err(e) = Regex::new(pattern) {
                errors.push(ValidationError::InvalidPattern {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    match strategy {
        "read_write" | "parsing" => {
            let mut writers = 0;
            let mut readers = 0;
            for (index, node) in config.nodes.iter().enumerate() {
                match node.mode {
                    Mode::Read => readers += 1,
                    Mode::Write => writers += 1,
                    mode => errors.push(ValidationError::InvalidMode {
                        index,
                        strategy: strategy.to_string(),
                        mode,
                    }),
                }
            }
            if writers != 1 {
                errors.push(ValidationError::WriterCount {
                    strategy: strategy.to_string(),
                    found: writers,
                });
            }
            if readers == 0 {
                errors.push(ValidationError::NoReaders(strategy.to_string()));
            }
        }
        "random" | "round_robin" | "pattern" if config.nodes.is_empty() => {
            errors.push(ValidationError::NoNodes(strategy.to_string()));
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
