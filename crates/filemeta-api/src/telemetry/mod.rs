use filemeta_core::config::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "filemeta=debug,tower_http=info";

/// Initialize tracing: compact console output, or one JSON object per line.
pub fn init_telemetry(log_format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    match log_format {
        LogFormat::Compact => {
            let console_fmt = tracing_subscriber::fmt::layer().event_format(
                Format::default()
                    .compact()
                    .with_target(false)
                    .without_time(),
            );
            tracing_subscriber::registry()
                .with(filter)
                .with(console_fmt)
                .try_init()?;
        }
        LogFormat::Json => {
            let json_fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_fmt)
                .try_init()?;
        }
    }

    tracing::debug!(log_format = ?log_format, "Tracing initialized");
    Ok(())
}
