//! Configuration and logging helpers

pub mod config;
pub mod logging;

pub use config::{
    load_config, save_config, AppConfig, ClassificationSettings, LexiconSettings,
    LoggingSettings, OutputSettings, SummarySettings, TextSettings,
};
pub use logging::init_logging;
