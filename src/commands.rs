//! Subcommand implementations
//!
//! Each command returns the text to print so the binary stays a thin
//! argument parser.

use std::path::{Path, PathBuf};

use rmslog_app::document::display_name;
use rmslog_app::{init_config_dir, load_settings, settings_dir_for, LogDocument, OutlineService};
use rmslog_core::prelude::*;

use crate::render::{render_outline, render_search, to_json};

/// Flags shared by every document command
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Scan the raw text without closing deactivated records
    pub no_preprocess: bool,
}

/// Load settings for `file`, apply overrides and read the document.
///
/// A blank document is not an error: it yields an empty outline.
pub fn open(file: &Path, options: Options) -> Result<(OutlineService, LogDocument)> {
    let mut settings = load_settings(&settings_dir_for(file));
    settings.validate()?;
    if options.no_preprocess {
        settings.parser.preprocess = false;
    }

    let document = match LogDocument::load(file) {
        Ok(document) => document,
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            LogDocument::new(display_name(file), String::new())
        }
        Err(e) => return Err(e),
    };

    Ok((OutlineService::new(settings), document))
}

pub fn outline(file: &Path, json: bool, options: Options) -> Result<String> {
    let (service, document) = open(file, options)?;
    let view = service.outline(&document);
    if json {
        to_json(&view.outline)
    } else {
        Ok(render_outline(&view, service.settings().display.show_elapsed))
    }
}

pub fn blocks(file: &Path, options: Options) -> Result<String> {
    let (service, document) = open(file, options)?;
    to_json(&service.blocks(&document))
}

pub fn search(file: &Path, query: &str, json: bool, options: Options) -> Result<String> {
    let (service, document) = open(file, options)?;
    let outcome = service.search(&document, query);
    if json {
        to_json(&outcome)
    } else {
        Ok(render_search(query, &outcome))
    }
}

/// Write the default `.rmslog/config.toml` under `dir` (or the working
/// directory)
pub fn init(dir: Option<PathBuf>) -> Result<String> {
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = init_config_dir(&dir)?;
    Ok(format!("Config: {}\n", path.display()))
}
