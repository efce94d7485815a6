//! Settings parser for .rmslog/config.toml

use super::types::Settings;
use rmslog_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const RMSLOG_DIR: &str = ".rmslog";

/// Directory whose `.rmslog/` applies to a log file: the file's parent,
/// or the working directory for a bare file name.
pub fn settings_dir_for(log_path: &Path) -> PathBuf {
    match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load settings from .rmslog/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(base_dir: &Path) -> Settings {
    let config_path = base_dir.join(RMSLOG_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the default config file in .rmslog/
///
/// An existing config file is left untouched.
pub fn init_config_dir(base_dir: &Path) -> Result<PathBuf> {
    let rmslog_dir = base_dir.join(RMSLOG_DIR);

    if !rmslog_dir.exists() {
        std::fs::create_dir_all(&rmslog_dir)
            .map_err(|e| Error::config(format!("Failed to create .rmslog dir: {}", e)))?;
    }

    let config_path = rmslog_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created {:?}", config_path);
    }

    Ok(config_path)
}

fn generate_default_config() -> String {
    r#"# RMS Log Outline Configuration

[parser]
duration_window = 400   # Characters searched after a job for its elapsed time
preprocess = true       # Close unterminated "- deactivated" records

[display]
show_elapsed = true
group_by_realization = true   # One top-level node per realization
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let rmslog_dir = temp.path().join(".rmslog");
        std::fs::create_dir_all(&rmslog_dir).unwrap();

        let config = r#"
[parser]
duration_window = 800
preprocess = false

[display]
group_by_realization = false
"#;
        std::fs::write(rmslog_dir.join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.parser.duration_window, 800);
        assert!(!settings.parser.preprocess);
        assert!(settings.display.show_elapsed);
        assert!(!settings.display.group_by_realization);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let rmslog_dir = temp.path().join(".rmslog");
        std::fs::create_dir_all(&rmslog_dir).unwrap();
        std::fs::write(rmslog_dir.join("config.toml"), "not valid toml {{{{").unwrap();

        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir() {
        let temp = tempdir().unwrap();

        let path = init_config_dir(temp.path()).unwrap();
        assert_eq!(path, temp.path().join(".rmslog/config.toml"));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Settings = toml::from_str(&content).expect("Default config should be valid TOML");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();
        let path = init_config_dir(temp.path()).unwrap();

        std::fs::write(&path, "[parser]\nduration_window = 10\n").unwrap();
        init_config_dir(temp.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("duration_window = 10"));
    }

    #[test]
    fn test_settings_dir_for() {
        assert_eq!(
            settings_dir_for(Path::new("/logs/run/rms.html")),
            PathBuf::from("/logs/run")
        );
        assert_eq!(settings_dir_for(Path::new("rms.html")), PathBuf::from("."));
    }
}
