//! Immutable service configuration.
//!
//! Built once at startup (from the command line in `main.rs`), validated,
//! then handed to the router factory. Nothing in here changes afterwards.

use crate::converter::ConvertOptions;
use crate::errors::ConverterError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PATH: &str = "/convert";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for a service run.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind; all interfaces by default.
    pub bind: IpAddr,
    pub port: u16,
    /// Path that accepts `POST` conversions.
    pub path: String,
    /// Largest accepted request body. `None` reads bodies of any size.
    pub max_body_bytes: Option<usize>,
    /// Per-request deadline. `None` lets requests run indefinitely.
    pub request_timeout: Option<Duration>,
    pub convert: ConvertOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            max_body_bytes: Some(DEFAULT_MAX_BODY_BYTES),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            convert: ConvertOptions::default(),
        }
    }
}

impl ServiceConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Reject settings the router or the converter cannot work with.
    pub fn validate(&self) -> Result<(), ConverterError> {
        if !self.path.starts_with('/') {
            return Err(ConverterError::Config(format!(
                "conversion path must start with '/': {:?}",
                self.path
            )));
        }
        if self.path.contains([':', '*', '{', '}']) {
            return Err(ConverterError::Config(format!(
                "conversion path must be a literal path without ':', '*', '{{' or '}}': {:?}",
                self.path
            )));
        }
        if self.convert.content_key.is_empty() {
            return Err(ConverterError::Config(
                "content key must not be empty".to_string(),
            ));
        }
        if self.convert.max_depth == 0 {
            return Err(ConverterError::Config(
                "maximum nesting depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.path, "/convert");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_must_be_absolute() {
        let config = ServiceConfig {
            path: "convert".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConverterError::Config(_))));
    }

    #[test]
    fn test_path_must_be_literal() {
        for path in ["/:id", "/{id}", "/files/*rest"] {
            let config = ServiceConfig {
                path: path.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "path {:?}", path);
        }
    }

    #[test]
    fn test_content_key_and_depth() {
        let mut config = ServiceConfig::default();
        config.convert.content_key.clear();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.convert.max_depth = 0;
        assert!(config.validate().is_err());
    }
}
