//! assessment-config
//!
//! Persistent user preferences for the assessment shell: default report
//! recipient, export directory, page layout and colour output.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{app_data_dir, ConfigManager};
pub use model::{Config, ConfigKey};
