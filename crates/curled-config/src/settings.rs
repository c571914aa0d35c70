//! Configuration file schema (curled.toml and ~/.curled/config.toml)
//!
//! Both the global and the project file share this schema; the loader merges
//! them section by section.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings read from a single configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Where to find libcurl and how to initialize it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryConfig>,

    /// Defaults applied to new transfer sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<TransferConfig>,
}

/// Native library settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Explicit path to the libcurl shared object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Extra directories searched before the platform defaults
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,

    /// Flags passed to curl_global_init
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_flags: Option<GlobalFlags>,
}

/// Subsystems initialized by curl_global_init
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlobalFlags {
    /// Initialize everything
    #[default]
    All,
    /// Initialize the TLS backend only
    Ssl,
    /// Initialize the Win32 socket layer only
    Win32,
    /// Initialize nothing
    Nothing,
}

impl FromStr for GlobalFlags {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(GlobalFlags::All),
            "ssl" => Ok(GlobalFlags::Ssl),
            "win32" => Ok(GlobalFlags::Win32),
            "nothing" => Ok(GlobalFlags::Nothing),
            other => Err(ConfigError::InvalidValue {
                field: "library.global_flags".to_string(),
                reason: format!(
                    "must be 'all', 'ssl', 'win32', or 'nothing', got '{}'",
                    other
                ),
            }),
        }
    }
}

/// Per-session transfer defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TransferConfig {
    /// Follow HTTP redirects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_location: Option<bool>,

    /// Maximum number of redirects to follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redirs: Option<i64>,

    /// User-Agent header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Whole-transfer timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,

    /// Connection phase timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<i64>,

    /// Ask libcurl for verbose output on stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl TransferConfig {
    /// Overlay `other` onto this section, field by field
    pub fn merge(&mut self, other: &TransferConfig) {
        if other.follow_location.is_some() {
            self.follow_location = other.follow_location;
        }
        if other.max_redirs.is_some() {
            self.max_redirs = other.max_redirs;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent.clone();
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
        if other.connect_timeout_ms.is_some() {
            self.connect_timeout_ms = other.connect_timeout_ms;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }
}

impl LibraryConfig {
    /// Overlay `other` onto this section. Search paths from `other` go first.
    pub fn merge(&mut self, other: &LibraryConfig) {
        if other.path.is_some() {
            self.path = other.path.clone();
        }
        if !other.search_paths.is_empty() {
            let mut paths = other.search_paths.clone();
            paths.extend(self.search_paths.drain(..));
            self.search_paths = paths;
        }
        if other.global_flags.is_some() {
            self.global_flags = other.global_flags;
        }
    }
}

impl Settings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let settings: Self =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error: e,
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(transfer) = &self.transfer {
            validate_non_negative("transfer.max_redirs", transfer.max_redirs)?;
            validate_non_negative("transfer.timeout_ms", transfer.timeout_ms)?;
            validate_non_negative("transfer.connect_timeout_ms", transfer.connect_timeout_ms)?;

            if let Some(agent) = &transfer.user_agent {
                if agent.contains('\0') {
                    return Err(ConfigError::InvalidValue {
                        field: "transfer.user_agent".to_string(),
                        reason: "contains a NUL byte".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Merge another settings file into this one.
    /// Other settings take precedence for values they define.
    pub fn merge(&mut self, other: &Settings) {
        if let Some(library) = &other.library {
            self.library.get_or_insert_with(Default::default).merge(library);
        }
        if let Some(transfer) = &other.transfer {
            self.transfer.get_or_insert_with(Default::default).merge(transfer);
        }
    }
}

fn validate_non_negative(field: &str, value: Option<i64>) -> ConfigResult<()> {
    match value {
        Some(v) if v < 0 => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be non-negative, got {}", v),
        }),
        _ => Ok(()),
    }
}
