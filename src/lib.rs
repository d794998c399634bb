//! Main library for the XML to JSON conversion service.
//!
//! The crate has two halves: the pure converter (`converter`, backed by
//! `formats` and `coercion`) and the HTTP listener (`server`) that exposes
//! it as `POST /convert`.

pub mod coercion;
pub mod config;
pub mod converter;
pub mod errors;
pub mod formats;
pub mod server;

pub use config::ServiceConfig;
pub use converter::{ConvertOptions, convert, convert_with_options};
pub use errors::{ConverterError, ParseError};

use log::info;
use tokio::net::TcpListener;

/// The main entry point for the service.
///
/// Validates the configuration, binds the listening socket once, and
/// serves until Ctrl+C. A bind failure is returned to the caller.
pub async fn run(config: ServiceConfig) -> Result<(), ConverterError> {
    config.validate()?;

    let addr = config.socket_addr();
    info!("Starting xml2json-service on {}", addr);
    info!("  Conversion path: {}", config.path);
    match config.max_body_bytes {
        Some(limit) => info!("  Max body size: {} bytes", limit),
        None => info!("  Max body size: unlimited"),
    }
    match config.request_timeout {
        Some(timeout) => info!("  Request timeout: {:.2?}", timeout),
        None => info!("  Request timeout: none"),
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ConverterError::Io(e, format!("Failed to bind {}", addr)))?;

    server::serve(listener, &config, server::shutdown_signal()).await
}
