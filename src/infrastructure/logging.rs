//! Global tracing subscriber setup

use tracing_subscriber::{
    EnvFilter,
    Layer,
    Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so stdout stays free for chain results, and every closed span
/// (one per resolved chain) is logged with its duration.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    tracing_subscriber::registry()
        .with(output_layer(config.format))
        .with(filter)
        .try_init()
        .map_err(|e| DomainError::configuration(format!("Logging already initialized: {}", e)))?;

    tracing::debug!(level = %config.level, "Logging initialized");
    Ok(())
}

fn level_filter(level: &str) -> Result<EnvFilter, DomainError> {
    EnvFilter::try_new(level).map_err(|e| {
        DomainError::configuration(format!("Invalid log level '{}': {}", level, e))
    })
}

fn output_layer(format: LogFormat) -> OutputLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);

    match format {
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
        LogFormat::Pretty => layer.pretty().with_target(true).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert!(level_filter("debug").is_ok());
        assert!(level_filter("request_chain=trace,reqwest=warn").is_ok());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = level_filter("request_chain=loud").unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_second_init_is_error() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Json,
        };

        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
