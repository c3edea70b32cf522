//! Configuration for the shoal aquarium.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file is not an error: every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shoal_core::{DEFAULT_FISH_COUNT, DEFAULT_LINK, Settings};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config directory could be determined for this platform")]
    NoConfigDir,
}

/// User-facing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of fish in the school.
    pub fish_count: usize,
    /// Relative page every fish links to.
    pub link: String,
    /// Directory the link is resolved against. Defaults to the working directory.
    pub site_root: Option<PathBuf>,
    /// Paint the glow-and-grain backdrop.
    pub backdrop: bool,
    /// Delay between frames in milliseconds.
    pub frame_interval_ms: u64,
    /// Fixed random seed; entropy is used when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fish_count: DEFAULT_FISH_COUNT,
            link: DEFAULT_LINK.to_string(),
            site_root: None,
            backdrop: true,
            frame_interval_ms: 16,
            seed: None,
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "shoal")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, returning defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)
    }

    /// Simulation settings derived from this config.
    pub fn settings(&self) -> Settings {
        Settings {
            fish_count: self.fish_count,
            link: self.link.clone(),
        }
    }

    /// Directory relative links are resolved against.
    pub fn site_root(&self) -> PathBuf {
        self.site_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "fish_count = 12\nseed = 42\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fish_count, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.link, DEFAULT_LINK);
        assert!(config.backdrop);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "fish_count = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            fish_count: 3,
            link: "blog/post2.html".to_string(),
            site_root: Some(PathBuf::from("/srv/site")),
            backdrop: false,
            frame_interval_ms: 33,
            seed: Some(7),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_settings_and_site_root() {
        let config = Config::default();
        assert_eq!(config.settings(), Settings::default());
        assert_eq!(config.site_root(), PathBuf::from("."));
    }
}
