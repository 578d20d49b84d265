//! Structured logging setup for Resizer services
//!
//! [`init`] installs the subscriber and hands back the service's root
//! span. Request spans opened under it carry the service name and
//! version in every JSON line without repeating them at each call site.

use tracing::{info_span, Span};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line (production)
    Json,
    /// Human-readable lines (development)
    Console,
}

impl LogFormat {
    /// `json` (any case) selects JSON, anything else the console format
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Console,
        }
    }
}

/// Install the subscriber and return the service root span.
///
/// `RUST_LOG` overrides `default_level`.
pub fn init(service_name: &str, version: &str, default_level: &str, format: LogFormat) -> Span {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init(),
        LogFormat::Console => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
    }

    let span = service_span(service_name, version);
    span.in_scope(|| tracing::info!(format = ?format, "Logging initialized"));
    span
}

/// Root span that request spans are parented to
pub fn service_span(service_name: &str, version: &str) -> Span {
    info_span!("service", service = service_name, version = version)
}
