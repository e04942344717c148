//! Configuration management.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the JSON snapshot inside the data directory.
const DATA_FILE_NAME: &str = "habit_data.json";

/// Environment variable overriding the snapshot file path.
pub const DATA_FILE_ENV_VAR: &str = "HABITRACK_DATA_FILE";

/// Main configuration for habitrack.
#[derive(Debug, Clone)]
pub struct HabitrackConfig {
    /// Directory holding the snapshot file.
    pub data_dir: PathBuf,
    /// Default HTTP port for the MCP server.
    pub port: u16,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    /// Data directory.
    data_dir: Option<String>,
    /// HTTP port.
    port: Option<u16>,
}

impl Default for HabitrackConfig {
    fn default() -> Self {
        let data_dir = directories::BaseDirs::new().map_or_else(
            || PathBuf::from(".habitrack"),
            |dirs| dirs.data_dir().join("habitrack"),
        );

        Self {
            data_dir,
            port: 3000,
        }
    }
}

impl HabitrackConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: e.to_string(),
        })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/habitrack/` on macOS)
    /// 2. XDG config dir (`~/.config/habitrack/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("habitrack").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        // Fall back to XDG-style ~/.config/habitrack/ for Unix compatibility
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("habitrack")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `HabitrackConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(port) = file.port {
            config.port = port;
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Resolves the snapshot file path.
    ///
    /// The `HABITRACK_DATA_FILE` environment variable overrides the
    /// configured data directory.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        std::env::var(DATA_FILE_ENV_VAR)
            .map_or_else(|_| self.data_dir.join(DATA_FILE_NAME), PathBuf::from)
    }
}
