use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

pub const HOST_VAR: &str = "CHROMA_GATEWAY_HOST";
pub const PORT_VAR: &str = "CHROMA_GATEWAY_PORT";
pub const PATH_VAR: &str = "CHROMA_GATEWAY_PATH";
pub const LOG_FORMAT_VAR: &str = "CHROMA_GATEWAY_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {key}: {details}")]
    Parse { key: String, details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Storage directory for the embedding store, or `:memory:`.
    pub persist_path: String,
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Reads the environment, falling back to defaults for unset variables:
    /// host `0.0.0.0`, port `8000`, storage `./data`, pretty logs.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Parse {
                key: PORT_VAR.to_string(),
                details: format!("{e}"),
            })?,
            None => defaults.port,
        };
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|details| ConfigError::Parse {
                key: LOG_FORMAT_VAR.to_string(),
                details,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: lookup(HOST_VAR).unwrap_or(defaults.host),
            port,
            persist_path: lookup(PATH_VAR).unwrap_or(defaults.persist_path),
            log_format,
        })
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8000,
            persist_path: "./data".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.persist_path, "./data");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_custom_values() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "9100"),
            (PATH_VAR, "/var/lib/chroma"),
            (LOG_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:9100");
        assert_eq!(config.persist_path, "/var/lib/chroma");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err = GatewayConfig::from_lookup(lookup(&[(PORT_VAR, "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains(PORT_VAR));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = GatewayConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }
}
