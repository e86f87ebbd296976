//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The route table comes from `[[routes]]` entries, with `render` naming
//! the screen; with no routes configured the funnel demo table is used.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ExitMode;
use crate::core::route::{RouteConfig, RouteTable};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavstackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub routes: Vec<RouteConfig<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub initial_path: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub exit_mode: Option<ExitMode>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_INITIAL_PATH: &str = "/";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "navstack.log";

/// Used when the config file declares no routes.
pub fn default_routes() -> Vec<RouteConfig<String>> {
    vec![
        RouteConfig::new("funnel", "Funnel".to_string())
            .child(RouteConfig::new("name", "FunnelName".to_string()))
            .child(RouteConfig::new("email", "FunnelEmail".to_string())),
        RouteConfig::new("/", "Main".to_string()),
        RouteConfig::new("*", "NotFound".to_string()),
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub initial_path: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub exit_mode: ExitMode,
    pub routes: RouteTable<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack").join("config.toml"))
}

/// Load config from `~/.navstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavstackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavstackConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavstackConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<NavstackConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: NavstackConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# navstack configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_path = "/"               # Or NAVSTACK_INITIAL_PATH, or --initial-path
# log_level = "debug"              # "off", "error", "warn", "info", "debug", "trace"
# log_file = "navstack.log"
# exit_mode = "animated"           # "animated" waits for exit-finished, "instant" does not

# [[routes]]
# path = "funnel"
# render = "Funnel"
#
#   [[routes.children]]
#   path = "name"
#   render = "FunnelName"
#
#   [[routes.children]]
#   path = "email"
#   render = "FunnelEmail"

# [[routes]]
# path = "/"
# render = "Main"

# [[routes]]
# path = "*"                       # Fallback when nothing else matches
# render = "NotFound"
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

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_initial_path` and `cli_exit_mode` are from CLI flags (None = not specified).
pub fn resolve(
    config: &NavstackConfig,
    cli_initial_path: Option<&str>,
    cli_exit_mode: Option<ExitMode>,
) -> ResolvedConfig {
    // Initial path: CLI → env → config → default
    let initial_path = cli_initial_path
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVSTACK_INITIAL_PATH").ok())
        .or_else(|| config.general.initial_path.clone())
        .unwrap_or_else(|| DEFAULT_INITIAL_PATH.to_string());

    // Log level: env → config → default
    let log_level = std::env::var("NAVSTACK_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .map(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("NAVSTACK_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let exit_mode = cli_exit_mode
        .or(config.general.exit_mode)
        .unwrap_or_default();

    let routes = if config.routes.is_empty() {
        default_routes()
    } else {
        config.routes.clone()
    };

    ResolvedConfig {
        initial_path,
        log_level,
        log_file: PathBuf::from(log_file),
        exit_mode,
        routes: RouteTable::new(routes),
    }
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NavstackConfig::default();
        assert!(config.routes.is_empty());
        assert!(config.general.initial_path.is_none());
    }

    #[test]
    fn test_resolve_uses_demo_routes_when_empty() {
        let resolved = resolve(&NavstackConfig::default(), None, None);
        assert_eq!(resolved.exit_mode, ExitMode::Animated);
        assert_eq!(resolved.routes.routes().len(), 3);
        let chain = resolved.routes.match_path("/funnel/email");
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].route.render, "FunnelEmail");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NavstackConfig {
            general: GeneralConfig {
                initial_path: Some("/funnel/name".to_string()),
                log_level: Some("warn".to_string()),
                log_file: Some("custom.log".to_string()),
                exit_mode: Some(ExitMode::Instant),
            },
            routes: vec![RouteConfig::new("/only", "Only".to_string())],
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.initial_path, "/funnel/name");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, PathBuf::from("custom.log"));
        assert_eq!(resolved.exit_mode, ExitMode::Instant);
        assert_eq!(resolved.routes.routes().len(), 1);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = NavstackConfig {
            general: GeneralConfig {
                initial_path: Some("/from-config".to_string()),
                exit_mode: Some(ExitMode::Instant),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("/from-cli"), Some(ExitMode::Animated));
        assert_eq!(resolved.initial_path, "/from-cli");
        assert_eq!(resolved.exit_mode, ExitMode::Animated);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        assert_eq!(parse_level("loud"), DEFAULT_LOG_LEVEL);
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
    }

    #[test]
    fn test_nested_routes_from_toml() {
        let toml_str = r#"
[general]
initial_path = "/"
exit_mode = "instant"

[[routes]]
path = "funnel"
render = "Funnel"

  [[routes.children]]
  path = "name"
  render = "FunnelName"

  [[routes.children]]
  path = "email"
  render = "FunnelEmail"

[[routes]]
path = "*"
render = "NotFound"
"#;
        let config: NavstackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.exit_mode, Some(ExitMode::Instant));
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].children.len(), 2);
        assert_eq!(config.routes[0].children[1].render, "FunnelEmail");
        assert!(config.routes[1].children.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
log_level = "info"
"#;
        let config: NavstackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert!(config.general.initial_path.is_none());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_load_config_from_missing_file_is_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
