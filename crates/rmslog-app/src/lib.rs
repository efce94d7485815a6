//! # rmslog-app - Settings and Outline Service
//!
//! Glue between log files on disk and the `rmslog-core` parser:
//!
//! - [`config`] - `.rmslog/config.toml` loading, defaults and `init`
//! - [`LogDocument`] - A log file's name and text
//! - [`OutlineService`] - Outlines, title search and reveal targets for a
//!   document, driven by [`Settings`]

pub mod config;
pub mod document;
pub mod service;

pub use config::{
    init_config_dir, load_settings, settings_dir_for, DisplaySettings,
    ParserSettings, Settings,
};
pub use document::LogDocument;
pub use service::{OutlineService, OutlineView, Reveal, RevealTarget, SearchHit, SearchOutcome};
