//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.todolist/config.toml` unless `--config` points
//! elsewhere. If the default file is missing on first run, a commented-out
//! default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub notice_duration_ms: Option<u64>,
    pub description_max_lines: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOTICE_DURATION_MS: u64 = 2000;
pub const DEFAULT_DESCRIPTION_MAX_LINES: u16 = 4;
pub const DEFAULT_LOG_FILE: &str = "todolist.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub notice_duration_ms: u64,
    pub description_max_lines: u16,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            description_max_lines: DEFAULT_DESCRIPTION_MAX_LINES,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
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
    #[error("invalid log level {0:?} (expected off, error, warn, info, debug or trace)")]
    InvalidLevel(String),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.todolist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".todolist").join("config.toml"))
}

/// Load config from the default location.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TodoConfig::default()`.
pub fn load_config() -> Result<TodoConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(TodoConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TodoConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an I/O error here,
/// since the user asked for it by name.
pub fn load_config_from(path: &Path) -> Result<TodoConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TodoConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# todolist configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# notice_duration_ms = 2000          # How long "Enter title" style notices stay up
# description_max_lines = 4          # Lines of description shown per row

# [logging]
# file = "todolist.log"              # Or set TODOLIST_LOG_FILE
# level = "info"                     # off, error, warn, info, debug, trace (or TODOLIST_LOG_LEVEL)
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TodoConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &TodoConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("TODOLIST_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // Log level: CLI → env → config → default
    let log_level = match cli
        .log_level
        .clone()
        .or_else(|| env("TODOLIST_LOG_LEVEL"))
        .or_else(|| config.logging.level.clone())
    {
        Some(level) => parse_level(&level)?,
        None => DEFAULT_LOG_LEVEL,
    };

    Ok(ResolvedConfig {
        notice_duration_ms: config
            .general
            .notice_duration_ms
            .unwrap_or(DEFAULT_NOTICE_DURATION_MS),
        description_max_lines: config
            .general
            .description_max_lines
            .unwrap_or(DEFAULT_DESCRIPTION_MAX_LINES)
            .max(1),
        log_file,
        log_level,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLevel(level.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve_with_env(&TodoConfig::default(), &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TodoConfig {
            general: GeneralConfig {
                notice_duration_ms: Some(500),
                description_max_lines: Some(2),
            },
            logging: LoggingConfig {
                file: Some("/tmp/todo.log".to_string()),
                level: Some("debug".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved.notice_duration_ms, 500);
        assert_eq!(resolved.description_max_lines, 2);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/todo.log"));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_env_beats_file_and_cli_beats_env() {
        let config = TodoConfig {
            logging: LoggingConfig {
                file: None,
                level: Some("warn".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "TODOLIST_LOG_LEVEL").then(|| "trace".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env).unwrap();
        assert_eq!(resolved.log_level, LevelFilter::Trace);

        let cli = CliOverrides {
            log_level: Some("error".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env).unwrap();
        assert_eq!(resolved.log_level, LevelFilter::Error);
    }

    #[test]
    fn test_invalid_level_is_an_error() {
        let cli = CliOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        let err = resolve_with_env(&TodoConfig::default(), &cli, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(ref l) if l == "loud"));
    }

    #[test]
    fn test_zero_description_lines_clamped() {
        let config = TodoConfig {
            general: GeneralConfig {
                description_max_lines: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved.description_max_lines, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
notice_duration_ms = 3500
"#;
        let config: TodoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.notice_duration_ms, Some(3500));
        assert!(config.general.description_max_lines.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_generated_default_parses_to_defaults() {
        let config: TodoConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.notice_duration_ms.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_config_from_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general\nnotice_duration_ms = ").unwrap();
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
