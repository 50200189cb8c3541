//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BalancerConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::error::BalancerError;

/// Error type for configuration loading and cluster construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Cluster construction failed: {0}")]
    Build(#[from] BalancerError),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<BalancerConfig, ConfigError> {
    let config: BalancerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BalancerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), nodes = config.nodes.len(), strategy = %config.cluster.strategy, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Mode;
    use std::io::Write;

    const SAMPLE: &str = r#"
[cluster]
strategy = "parsing"
max_idle_connections = 20
seed = 42

[[nodes]]
url = "postgres://10.2.6.100:5432/appstax"
driver = "postgres"
mode = "write"

[[nodes]]
url = "postgres://10.2.5.100:5432/appstax"
driver = "postgres"
mode = "read"
[nodes.values]
zone = "eu-1"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.cluster.strategy, "parsing");
        assert_eq!(config.cluster.max_idle_connections, 20);
        assert_eq!(config.cluster.seed, Some(42));
        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.nodes[0].mode, Mode::Write);
        assert_eq!(config.nodes[1].values.get("zone").map(String::as_str), Some("eu-1"));
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.nodes.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(load_config(Path::new("/nonexistent/sqlbalance.toml")), Err(ConfigError::Io(_))));
        assert!(matches!(parse_config("[cluster"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_config("[[nodes]]\nurl = \"x\"\n"), Err(ConfigError::Parse(_))));

        let err = parse_config("[cluster]\nstrategy = \"read_write\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 2));
        assert!(err.to_string().starts_with("Validation failed: "));
    }
}
