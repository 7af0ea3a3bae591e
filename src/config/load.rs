//! The main config loading module for skiff.
//!
//! Handles loading and deserializing settings from `skiff.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the internal
//! [RawConfig] used for parsing and processing.
//!
//! Also implements default config initialization when `skiff.toml` is not
//! present.

use crate::config::{General, Service, Theme};

use serde::Deserialize;
use tracing::warn;

use std::{fs, io, path::PathBuf};

/// Raw configuration as read from the toml file.
/// This struct is deserialized directly from the toml file and then
/// converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    service: Service,
    general: General,
    theme: Theme,
}

/// Main configuration struct for skiff.
#[derive(Debug, Clone, Default)]
pub struct Config {
    service: Service,
    general: General,
    theme: Theme,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            service: raw.service,
            general: raw.general,
            theme: raw.theme,
        }
    }
}

impl Config {
    #[inline]
    pub fn service(&self) -> &Service {
        &self.service
    }

    #[inline]
    pub fn service_mut(&mut self) -> &mut Service {
        &mut self.service
    }

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Default config file location: `<config dir>/skiff/skiff.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skiff")
            .join("skiff.toml")
    }

    /// Loads the config from the default path, falling back to built-in
    /// defaults when the file is missing or invalid.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &PathBuf) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(path = %path.display(), %err, "invalid config, using defaults");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Writes a commented default config file. Refuses to overwrite an
    /// existing one.
    pub fn generate_default(path: &PathBuf) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        println!("Wrote {}", path.display());
        Ok(())
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = r##"# skiff.toml

[service]
# Base URL of the file service.
url = "http://127.0.0.1:8188"
# Per-request timeout in seconds. Requests are never retried.
timeout_secs = 30

[general]
# Ask before deleting.
confirm_delete = true
# Show file type icons (needs a Nerd Font).
icons = true
# Where downloads land. Defaults to the platform download directory.
# download_dir = "/home/me/Downloads"

[theme]
# Colors take names ("red", "cyan", ...) or hex ("#89b4fa").
accent = "#89b4fa"
directory = "#f9e2af"
parent_row = "#89b4fa"
selection_bg = "#3a3a68"
error = "#f38ba8"
success = "#a6e3a1"
border = "#3a3a5c"
muted = "#6c7086"
"##;
