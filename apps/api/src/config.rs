//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use emporium_core::SubmitPolicy;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (`EMPORIUM_BIND_ADDR`)
    pub bind_addr: IpAddr,

    /// Listen port (`EMPORIUM_PORT`)
    pub port: u16,

    /// SQLite file (`EMPORIUM_DB_PATH`)
    pub db_path: PathBuf,

    /// Pool size (`EMPORIUM_DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// Empty the cart after a successful submit (`EMPORIUM_CLEAR_CART_ON_SUBMIT`)
    pub clear_cart_on_submit: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(ApiConfig {
            bind_addr: var("EMPORIUM_BIND_ADDR", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EMPORIUM_BIND_ADDR".to_string()))?,

            port: var("EMPORIUM_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EMPORIUM_PORT".to_string()))?,

            db_path: PathBuf::from(var("EMPORIUM_DB_PATH", "emporium.db")),

            db_max_connections: var("EMPORIUM_DB_MAX_CONNECTIONS", "5")
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("EMPORIUM_DB_MAX_CONNECTIONS".to_string()))?,

            clear_cart_on_submit: var("EMPORIUM_CLEAR_CART_ON_SUBMIT", "false")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EMPORIUM_CLEAR_CART_ON_SUBMIT".to_string()))?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy::from_clear_flag(self.clear_cart_on_submit)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.db_path, PathBuf::from("emporium.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.submit_policy(), SubmitPolicy::RetainCart);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("EMPORIUM_BIND_ADDR", "127.0.0.1"),
            ("EMPORIUM_PORT", "9000"),
            ("EMPORIUM_DB_PATH", "/tmp/shop.db"),
            ("EMPORIUM_DB_MAX_CONNECTIONS", "8"),
            ("EMPORIUM_CLEAR_CART_ON_SUBMIT", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.db_max_connections, 8);
        assert_eq!(config.submit_policy(), SubmitPolicy::ClearCart);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("EMPORIUM_PORT", "eighty"),
            ("EMPORIUM_BIND_ADDR", "localhost:80"),
            ("EMPORIUM_DB_MAX_CONNECTIONS", "0"),
            ("EMPORIUM_CLEAR_CART_ON_SUBMIT", "yes"),
        ] {
            let err = from_map(&[(name, value)]).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {}", name));
        }
    }
}
