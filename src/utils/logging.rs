//! Logging setup

use super::config::LoggingSettings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// again after a subscriber is installed does nothing.
pub fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(settings.with_target).with_thread_ids(false))
        .with(filter)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let settings = LoggingSettings {
            level: "not a valid ==== directive".to_string(),
            ..Default::default()
        };
        init_logging(&settings);
        init_logging(&LoggingSettings::default());
        tracing::info!("still logging");
    }
}
