//! User configuration — display options and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/statline/config` (default `~/.config/statline/config`).

use std::fs;
use std::path::PathBuf;

/// Persisted application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Show the size/type infostring in the status line's left part.
    pub display_size_in_status_bar: bool,
    /// Show hidden (dot) files in listings.
    pub show_hidden: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display_size_in_status_bar: true,
            show_hidden: false,
        }
    }
}

impl AppConfig {
    fn config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("statline").join("config"))
    }

    /// Load from disk, falling back to defaults for anything missing.
    pub fn load() -> Self {
        let mut config = Self::default();
        let Some(path) = Self::config_path() else {
            return config;
        };
        let Ok(raw) = fs::read_to_string(&path) else {
            return config;
        };

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim() == "true";
            match key.trim() {
                "display_size_in_status_bar" => config.display_size_in_status_bar = value,
                "show_hidden" => config.show_hidden = value,
                other => tracing::debug!(key = other, "unknown config key"),
            }
        }
        config
    }

    /// Write the current values back to the config file.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let body = format!(
            "display_size_in_status_bar = {}\nshow_hidden = {}\n",
            self.display_size_in_status_bar, self.show_hidden
        );
        fs::write(path, body)
    }
}
