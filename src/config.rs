//! shelfseed runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Front-end page detection and URLs
    pub frontend: FrontendOptions,
    /// QR label rendering
    pub qr: QrOptions,
    /// Catalog store seeding
    pub catalog: CatalogOptions,
    /// Server setup guide output
    pub guide: GuideOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl SetupConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No shelfseed.toml / shelfseed.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["shelfseed.toml", "shelfseed.yaml", "shelfseed.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("shelfseed");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match extension_of(path).as_str() {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.catalog.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Lower-cased file extension, or an empty string when there is none.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Where the front-end page lives and which URL each serving method exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendOptions {
    /// Front-end page whose presence selects the static-file-server URL
    pub page: PathBuf,
    /// URL encoded when the page is present
    pub static_url: String,
    /// URL encoded when the page is missing
    pub backend_url: String,
}

impl Default for FrontendOptions {
    fn default() -> Self {
        Self {
            page: PathBuf::from("index.html"),
            static_url: "http://localhost:8080/index.html".to_string(),
            backend_url: "http://localhost:6969/frontend".to_string(),
        }
    }
}

/// QR label output and text options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Output image path, overwritten on every run
    pub output: PathBuf,
    /// First text line under the code
    pub title: String,
    /// Second text line under the code
    pub subtitle: String,
    /// Preferred scalable font; the built-in font is used when this fails to load
    pub font: Option<PathBuf>,
    /// Title pixel size
    pub title_size: f32,
    /// Subtitle pixel size
    pub subtitle_size: f32,
    /// Decode the composed label after rendering and warn on mismatch
    pub verify: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("library_frontend_qr.png"),
            title: "Library Management System".to_string(),
            subtitle: "Scan to access the library".to_string(),
            font: Some(PathBuf::from("Arial.ttf")),
            title_size: 20.0,
            subtitle_size: 14.0,
            verify: true,
        }
    }
}

/// Catalog store options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// SQLite database file holding the `books` table
    pub database: PathBuf,
    /// External seed list (toml/yaml); the bundled list is used when unset
    pub seed_file: Option<PathBuf>,
    /// Create the database and `books` table when missing
    pub create_schema: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            database: PathBuf::from("library.db"),
            seed_file: None,
            create_schema: false,
        }
    }
}

impl CatalogOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(database) = env::var("SHELFSEED_DATABASE") {
            if !database.trim().is_empty() {
                self.database = PathBuf::from(database);
            }
        }
    }
}

/// Server setup guide options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideOptions {
    /// Write the guide at all
    pub enabled: bool,
    /// Guide path, overwritten on every run
    pub output: PathBuf,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            output: PathBuf::from("server_setup_guide.txt"),
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `SHELFSEED_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("SHELFSEED_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("SHELFSEED_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("SHELFSEED_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("SHELFSEED_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
