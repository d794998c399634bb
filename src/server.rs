//! HTTP listener in front of the converter.
//!
//! One route: `POST <path>` takes an XML body and answers with the JSON
//! rendering (`200`) or the literal `BAD REQUEST` (`400`). Other methods on
//! that path get `405`, other paths `404`, both without a body.
//!
//! Each connection is served on its own task; the conversion itself is
//! CPU-bound and runs on the blocking pool. The only shared state is the
//! immutable conversion options.

use crate::config::ServiceConfig;
use crate::converter::{self, ConvertOptions};
use crate::errors::ConverterError;
use crate::formats::Format;
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use log::{error, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use uuid::Uuid;

/// Body sent with every `400` response.
pub const BAD_REQUEST_BODY: &str = "BAD REQUEST";

#[derive(Clone)]
struct AppState {
    options: Arc<ConvertOptions>,
}

/// Build the router for `config`. The config is assumed to be validated.
pub fn router(config: &ServiceConfig) -> Router {
    let state = AppState {
        options: Arc::new(config.convert.clone()),
    };

    let router = Router::new()
        .route(&config.path, post(convert_handler))
        .with_state(state);

    let router = match config.max_body_bytes {
        Some(limit) => router.layer(DefaultBodyLimit::max(limit)),
        None => router.layer(DefaultBodyLimit::disable()),
    };

    match config.request_timeout {
        Some(timeout) => router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        )),
        None => router,
    }
}

/// Serve `config` on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` fires.
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServiceConfig,
    shutdown: F,
) -> Result<(), ConverterError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| ConverterError::Io(e, "Failed to read listener address".to_string()))?;
    info!("Listening on http://{}{}", addr, config.path);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ConverterError::Io(e, "HTTP server failed".to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server simply runs until killed.
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn convert_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                "[{}] Failed to read request body: {}",
                request_id,
                rejection.body_text()
            );
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return rejection.into_response();
            }
            return bad_request();
        }
    };

    let input_len = body.len();
    let options = Arc::clone(&state.options);
    let outcome = tokio::task::spawn_blocking(move || {
        let text = String::from_utf8_lossy(&body);
        converter::convert_with_options(&text, &options)
    })
    .await;

    match outcome {
        Ok(Ok(json)) => {
            info!(
                "[{}] 200: {} bytes of XML -> {} bytes of JSON (took {:.2?})",
                request_id,
                input_len,
                json.len(),
                start.elapsed()
            );
            json_response(json)
        }
        Ok(Err(e)) => {
            info!(
                "[{}] 400: {} (took {:.2?})",
                request_id,
                e,
                start.elapsed()
            );
            bad_request()
        }
        Err(e) => {
            error!("[{}] Conversion task failed: {}", request_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn json_response(body: String) -> Response {
    text_response(StatusCode::OK, Format::Json, body)
}

fn bad_request() -> Response {
    text_response(
        StatusCode::BAD_REQUEST,
        Format::Text,
        BAD_REQUEST_BODY.to_string(),
    )
}

fn text_response(status: StatusCode, format: Format, body: String) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(format.mime_type()),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        body,
    )
        .into_response()
}
