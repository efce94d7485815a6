//! Configuration file parsing for RMS Log Outline
//!
//! Settings live in `.rmslog/config.toml` next to the log being outlined.

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, settings_dir_for};
pub use types::*;
