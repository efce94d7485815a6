//! RMS Log Outline Library
//!
//! Command-line front end for outlining RMS HTML logs. Parsing lives in
//! `rmslog-core`; settings and the outline service in `rmslog-app`.

pub mod commands;
pub mod render;

// Re-export the workspace crates
pub use rmslog_app as app;
pub use rmslog_core as core;
