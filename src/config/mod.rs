// Configuration layer - environment settings and logging
pub mod logging;
pub mod settings;

pub use settings::{AppSettings, ConfigError};
