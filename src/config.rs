use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_floor_plan")]
    pub floor_plan: PathBuf,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_icon_dir")]
    pub icon_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the `pins` and `categories` snapshots. Defaults to the
    /// platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default value functions
fn default_floor_plan() -> PathBuf {
    PathBuf::from("assets/mapa2.png")
}

fn default_min_zoom() -> f64 {
    3.9
}

fn default_max_zoom() -> f64 {
    8.0
}

fn default_initial_zoom() -> f64 {
    4.0
}

fn default_zoom_step() -> f64 {
    0.25
}

fn default_icon_dir() -> PathBuf {
    PathBuf::from("assets/icons")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            floor_plan: default_floor_plan(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            initial_zoom: default_initial_zoom(),
            zoom_step: default_zoom_step(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            icon_dir: default_icon_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "factory-map")?;
    Some(dirs.config_dir().join("config.toml"))
}

/// Parse config text; missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load configuration from file. A missing file (or a platform without a
/// config directory) gives the defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => Ok(AppConfig::default()),
    }
}

fn read_config(path: &std::path::Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    let write_err = |source| ConfigError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let toml = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml).map_err(write_err)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [map]
            max_zoom = 6.5

            [storage]
            data_dir = "/tmp/pins"
            "#,
        )
        .unwrap();
        assert_eq!(config.map.max_zoom, 6.5);
        assert_eq!(config.map.min_zoom, 3.9);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/pins")));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn pretty_output_parses_back() {
        let mut config = AppConfig::default();
        config.assets.icon_dir = PathBuf::from("icons");
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(parse_config("[map]\nmin_zoom = \"low\"").is_err());
    }
}
