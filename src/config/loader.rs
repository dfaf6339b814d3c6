//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.bind_address`.
pub const ENV_LISTEN_ADDR: &str = "LISTEN_ADDR";
/// Environment variable overriding `endpoints.dir`.
pub const ENV_CONFIG_DIR: &str = "CONFIG_DIR";
/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "GATEWAY_LOG";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse configuration from a TOML file.
///
/// Not validated here: environment and command-line layers may still change it.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment overrides using `lookup`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(addr) = get(ENV_LISTEN_ADDR) {
        config.listener.bind_address = addr;
    }
    if let Some(dir) = get(ENV_CONFIG_DIR) {
        config.endpoints.dir = dir;
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut GatewayConfig) {
    apply_env_overrides(config, |key| std::env::var(key).ok());
}

/// Run semantic validation on the final configuration.
pub fn validated(config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[endpoints]\ndir = \"/etc/gateway/endpoints\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.endpoints.dir, "/etc/gateway/endpoints");
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(&dir.path().join("missing.toml")), Err(ConfigError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener\nbind_address = 1").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            (ENV_LISTEN_ADDR, "127.0.0.1:7000"),
            (ENV_CONFIG_DIR, "/srv/endpoints"),
            (ENV_LOG_LEVEL, ""),
        ]);
        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
        assert_eq!(config.endpoints.dir, "/srv/endpoints");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_validated_reports_problems() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "gateway.internal:80".into();
        let err = validated(config).unwrap_err();
        assert!(err.to_string().starts_with("Validation failed: listener.bind_address"));
    }
}
