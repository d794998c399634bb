//! Main binary entry point for xml2json-service.

use clap::Parser;
use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;
use xml2json_service::config::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_PATH, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use xml2json_service::converter::DEFAULT_CONTENT_KEY;
use xml2json_service::errors::ConverterError;
use xml2json_service::formats::xml::DEFAULT_MAX_DEPTH;
use xml2json_service::{ConvertOptions, ServiceConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, value_name = "IP", default_value = "0.0.0.0")]
    bind: IpAddr,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = DEFAULT_PATH, help = "Path that accepts POSTed XML")]
    path: String,

    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_BODY_BYTES,
        help = "Largest accepted request body (0 = unlimited)"
    )]
    max_body_bytes: usize,

    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        help = "Per-request timeout in seconds (0 = none)"
    )]
    request_timeout_secs: u64,

    #[arg(long, help = "Keep numeric and boolean text as JSON strings")]
    keep_strings: bool,

    #[arg(
        long,
        value_name = "KEY",
        default_value = DEFAULT_CONTENT_KEY,
        help = "Key for text that sits next to attributes or child elements"
    )]
    content_key: String,

    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            bind: self.bind,
            port: self.port,
            path: self.path,
            max_body_bytes: (self.max_body_bytes > 0).then_some(self.max_body_bytes),
            request_timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
            convert: ConvertOptions {
                content_key: self.content_key,
                coerce_scalars: !self.keep_strings,
                max_depth: self.max_depth,
                ..Default::default()
            },
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), ConverterError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = cli.into_config();
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ConverterError::Io(e, "Failed to start async runtime".to_string()))?;

    runtime.block_on(xml2json_service::run(config))
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
