//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.thinkk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The file picks the log destination, so reading and resolving stay silent.
//! Anything worth reporting is kept (`LoadedConfig::announce`,
//! `ResolvedConfig::warnings`) until `main` has the logger running.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::mode::Mode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThinkkConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<Mode>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILE: &str = "thinkk.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const ENV_BASE_URL: &str = "THINKK_API_BASE_URL";
pub const ENV_MODE: &str = "THINKK_MODE";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub mode: Mode,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Problems found while resolving, logged once the logger is up.
    pub warnings: Vec<String>,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub mode: Option<Mode>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.thinkk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".thinkk").join("config.toml"))
}

/// Where the file config came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file yet; `announce` writes a commented default here.
    Missing(PathBuf),
    NoHome,
}

/// The parsed file config plus its origin.
///
/// Reading happens before the logger exists (the file decides where the log
/// goes), so nothing here logs. `announce` reports what happened once
/// logging is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ThinkkConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Log the config origin and generate the default file on first run.
    pub fn announce(&self) {
        match &self.source {
            ConfigSource::File(path) => {
                info!("Loaded config from {}", path.display());
                debug!("Config: {:?}", self.config);
            }
            ConfigSource::Missing(path) => {
                info!("No config file found, generating default at {}", path.display());
                generate_default_config(path);
            }
            ConfigSource::NoHome => {
                warn!("Could not determine home directory, using default config");
            }
        }
    }
}

/// Read `~/.thinkk/config.toml` without side effects.
///
/// A missing file (or home directory) yields `ThinkkConfig::default()`. A
/// file that exists but is malformed returns `ConfigError::Parse`.
pub fn read_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => read_config_from(&path),
        None => Ok(LoadedConfig {
            config: ThinkkConfig::default(),
            source: ConfigSource::NoHome,
        }),
    }
}

pub fn read_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: ThinkkConfig::default(),
            source: ConfigSource::Missing(path.to_path_buf()),
        });
    }

    let contents = fs::read_to_string(path)?;
    let config: ThinkkConfig = toml::from_str(&contents)?;
    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# thinkk configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "reflection"        # "reflection" or "answer" (env: THINKK_MODE)
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "thinkk.log"

# [backend]
# base_url = "http://127.0.0.1:8000" # Or set THINKK_API_BASE_URL
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config against the process environment.
pub fn resolve(config: &ThinkkConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env → CLI.
///
/// `env` looks up an environment variable; split out so tests don't depend on
/// the real environment.
pub fn resolve_with_env(
    config: &ThinkkConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env(ENV_BASE_URL).filter(|s| !s.trim().is_empty()))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    // Mode: CLI → env → config → default
    let env_mode = env(ENV_MODE).and_then(|s| match s.parse::<Mode>() {
        Ok(mode) => Some(mode),
        Err(e) => {
            warnings.push(format!("Ignoring {ENV_MODE}: {e}"));
            None
        }
    });
    let mode = cli
        .mode
        .or(env_mode)
        .or(config.general.default_mode)
        .unwrap_or_default();

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|s| match s.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warnings.push(format!("Unknown log_level {s:?}, using default"));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        base_url,
        mode,
        log_level,
        log_file,
        warnings,
    }
}
