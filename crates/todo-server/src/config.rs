//! Server configuration from environment variables.

use std::env;

use todo_store::{DEFAULT_QUEUE_CAPACITY, NotifierConfig};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 4000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Load the demo todos at startup.
    pub seed_demo_data: bool,
    /// Capacity of each subscriber's event queue.
    pub event_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            seed_demo_data: true,
            event_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 4000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `SEED_DEMO_DATA`: Load demo todos (default: true)
    /// - `EVENT_QUEUE_CAPACITY`: Per-subscriber queue size (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|s| s.to_lowercase() != "false" && s != "0")
            .unwrap_or(defaults.seed_demo_data);

        let event_queue_capacity = match lookup("EVENT_QUEUE_CAPACITY") {
            Some(raw) => parse_number("EVENT_QUEUE_CAPACITY", &raw)?,
            None => defaults.event_queue_capacity,
        };
        if event_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "EVENT_QUEUE_CAPACITY".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            seed_demo_data,
            event_queue_capacity,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Notifier settings derived from this configuration.
    pub fn notifier_config(&self) -> NotifierConfig {
        NotifierConfig {
            queue_capacity: self.event_queue_capacity,
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert!(config.seed_demo_data);
        assert_eq!(config.event_queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("SEED_DEMO_DATA", "false"),
            ("EVENT_QUEUE_CAPACITY", "16"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_demo_data);
        assert_eq!(config.notifier_config().queue_capacity, 16);
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let err =
            ServerConfig::from_lookup(lookup(&[("EVENT_QUEUE_CAPACITY", "0")])).unwrap_err();
        assert!(err.to_string().contains("EVENT_QUEUE_CAPACITY"));
    }

    #[test]
    fn test_seed_flag_zero_disables() {
        let config = ServerConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "0")])).unwrap();
        assert!(!config.seed_demo_data);
    }
}
