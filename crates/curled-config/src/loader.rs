//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::settings::{GlobalFlags, LibraryConfig, Settings, TransferConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "curled.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.curled/config.toml) - lowest priority
/// 2. Project config (./curled.toml) - overrides global
/// 3. Environment variables - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged settings
    pub settings: Settings,

    /// Directory where curled.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use a specific file as the global configuration
    pub fn with_global_config_path(path: PathBuf) -> Self {
        Self {
            global_config_path: Some(path),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find curled.toml, merges it over the
    /// global config, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let mut settings = self.load_global_config()?;

        let (project_root, project) = self.find_project_config(start_dir)?;
        settings.merge(&project);

        let settings = self.apply_env_overrides(settings)?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let mut settings = self.load_global_config()?;
        settings.merge(&Settings::load_from_file(config_path)?);
        let settings = self.apply_env_overrides(settings)?;

        Ok(Config {
            settings,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, Settings)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let settings = Settings::load_from_file(&config_path)?;
                return Ok((Some(current), settings));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, Settings::default())),
            }
        }
    }

    /// Load global configuration, or defaults when the file is absent
    fn load_global_config(&mut self) -> ConfigResult<Settings> {
        if self.global_config_path.is_none() {
            match Self::global_config_dir() {
                Ok(dir) => self.global_config_path = Some(dir.join("config.toml")),
                // No home directory means no global config
                Err(ConfigError::HomeNotFound) => return Ok(Settings::default()),
                Err(e) => return Err(e),
            }
        }

        match &self.global_config_path {
            Some(path) if path.exists() => Settings::load_from_file(path),
            _ => Ok(Settings::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// - LIBCURL_LIBRARY_PATH: path to the libcurl shared object
    /// - CURLED_GLOBAL_FLAGS: all | ssl | win32 | nothing
    /// - CURLED_USER_AGENT, CURLED_MAX_REDIRS, CURLED_TIMEOUT_MS
    fn apply_env_overrides(&self, mut settings: Settings) -> ConfigResult<Settings> {
        if let Ok(path) = env::var("LIBCURL_LIBRARY_PATH") {
            if !path.is_empty() {
                settings.library.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(path));
            }
        }

        if let Ok(flags) = env::var("CURLED_GLOBAL_FLAGS") {
            let flags: GlobalFlags = flags.parse()?;
            settings.library.get_or_insert_with(Default::default).global_flags = Some(flags);
        }

        if let Ok(agent) = env::var("CURLED_USER_AGENT") {
            settings.transfer.get_or_insert_with(Default::default).user_agent = Some(agent);
        }

        if let Ok(value) = env::var("CURLED_MAX_REDIRS") {
            let redirs = parse_env_int("CURLED_MAX_REDIRS", &value)?;
            settings.transfer.get_or_insert_with(Default::default).max_redirs = Some(redirs);
        }

        if let Ok(value) = env::var("CURLED_TIMEOUT_MS") {
            let timeout = parse_env_int("CURLED_TIMEOUT_MS", &value)?;
            settings.transfer.get_or_insert_with(Default::default).timeout_ms = Some(timeout);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Get the global configuration directory (~/.curled)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".curled"))
    }
}

fn parse_env_int(name: &str, value: &str) -> ConfigResult<i64> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: name.to_string(),
        reason: format!("expected an integer, got '{}'", value),
    })
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Effective library settings
    pub fn library(&self) -> LibraryConfig {
        self.settings.library.clone().unwrap_or_default()
    }

    /// Effective transfer defaults
    pub fn transfer(&self) -> TransferConfig {
        self.settings.transfer.clone().unwrap_or_default()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a curled.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
