//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.paystate/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Config is read before the file logger exists, so loading and resolution
//! record their messages in a [`StartupLog`] that `main` flushes once the
//! logger is up.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::OutputFormat;
use crate::core::state::TabId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PaystateConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Tab that receives actions without an explicit `tabId`.
    pub current_tab: Option<u32>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CURRENT_TAB: u32 = 1;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "paystate.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub current_tab: TabId,
    pub output_format: OutputFormat,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Startup Log
// ============================================================================

/// Messages produced before logging is initialized.
#[derive(Debug, Default)]
pub struct StartupLog {
    entries: Vec<(Level, String)>,
}

impl StartupLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.entries.push((level, message.into()));
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    /// Forward everything to the installed logger, oldest first.
    pub fn flush(self) {
        for (level, message) in self.entries {
            log::log!(level, "{}", message);
        }
    }

    /// Warnings and errors, for when no logger could be installed.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level <= Level::Warn)
            .map(|(_, message)| message.as_str())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.paystate/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".paystate").join("config.toml"))
}

/// Load config from `~/.paystate/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PaystateConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut StartupLog) -> Result<PaystateConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            notes.push(
                Level::Warn,
                "Could not determine home directory, using default config",
            );
            return Ok(PaystateConfig::default());
        }
    };

    if !path.exists() {
        notes.push(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(&path, notes);
        return Ok(PaystateConfig::default());
    }

    load_config_from(&path, notes)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(
    path: &Path,
    notes: &mut StartupLog,
) -> Result<PaystateConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PaystateConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notes.push(Level::Info, format!("Loaded config from {}", path.display()));
    notes.push(Level::Debug, format!("Config: {:?}", config));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, notes: &mut StartupLog) {
    let default_content = r#"# paystate configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# current_tab = 1                    # Or set PAYSTATE_TAB; actions without tabId go here
# output_format = "pretty"           # "pretty" or "compact"

# [logging]
# level = "info"                     # Or set PAYSTATE_LOG_LEVEL
# file = "paystate.log"              # Or set PAYSTATE_LOG_FILE
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        notes.push(Level::Warn, format!("Failed to create config directory: {}", e));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        notes.push(Level::Warn, format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_tab` and `cli_format` are from CLI flags (None = not specified).
pub fn resolve(
    config: &PaystateConfig,
    cli_tab: Option<u32>,
    cli_format: Option<OutputFormat>,
    notes: &mut StartupLog,
) -> ResolvedConfig {
    resolve_with_env(config, cli_tab, cli_format, |key| std::env::var(key).ok(), notes)
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &PaystateConfig,
    cli_tab: Option<u32>,
    cli_format: Option<OutputFormat>,
    env: impl Fn(&str) -> Option<String>,
    notes: &mut StartupLog,
) -> ResolvedConfig {
    // Tab: CLI → env → config → default
    let current_tab = cli_tab
        .or_else(|| {
            env("PAYSTATE_TAB").and_then(|raw| parse_or_warn(notes, "PAYSTATE_TAB", &raw))
        })
        .or(config.general.current_tab)
        .unwrap_or(DEFAULT_CURRENT_TAB);

    // Output format: CLI → config → default
    let output_format = cli_format
        .or(config.general.output_format)
        .unwrap_or_default();

    // Log level: env → config → default
    let log_level = env("PAYSTATE_LOG_LEVEL")
        .or_else(|| config.logging.level.clone())
        .and_then(|raw| parse_or_warn(notes, "log level", &raw))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = env("PAYSTATE_LOG_FILE")
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        current_tab: TabId(current_tab),
        output_format,
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

fn parse_or_warn<T: FromStr>(notes: &mut StartupLog, what: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            notes.push(Level::Warn, format!("Ignoring invalid {}: {:?}", what, raw));
            None
        }
    }
}
