//! Configuration file management for garden.
//!
//! Provides a TOML-based config file at `~/.config/garden/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use garden_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the garden config directory: `$XDG_CONFIG_HOME/garden` or
/// `~/.config/garden`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("garden");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("garden")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

/// Serialize and write `config` to `path`, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(config, &config_path())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line, each overriding everything else.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub database_url: Option<&'a str>,
    pub bind: Option<&'a str>,
    pub port: Option<u16>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct GardenConfig {
    pub db_config: DbConfig,
    pub bind: String,
    pub port: u16,
}

impl GardenConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `--database-url` > `GARDEN_DATABASE_URL` > `database.url` > [`DbConfig::DEFAULT_URL`]
    /// - Bind: `--bind` > `GARDEN_BIND` > `server.bind` > [`DEFAULT_BIND`]
    /// - Port: `--port` > `GARDEN_PORT` > `server.port` > [`DEFAULT_PORT`]
    pub fn resolve(cli: &CliOverrides<'_>) -> Result<Self> {
        Self::resolve_with_file(cli, load_config().ok())
    }

    pub fn resolve_with_file(cli: &CliOverrides<'_>, file: Option<ConfigFile>) -> Result<Self> {
        // DbConfig::from_env owns the env-then-default rule; the file slots
        // in between when the env var is unset.
        let env_url_set = std::env::var_os(DbConfig::ENV_VAR).is_some();
        let db_config = match (cli.database_url, &file) {
            (Some(url), _) => DbConfig::new(url),
            (None, Some(cfg)) if !env_url_set => DbConfig::new(cfg.database.url.clone()),
            _ => DbConfig::from_env(),
        };

        let bind = if let Some(bind) = cli.bind {
            bind.to_string()
        } else if let Ok(bind) = std::env::var("GARDEN_BIND") {
            bind
        } else if let Some(ref cfg) = file {
            cfg.server.bind.clone()
        } else {
            default_bind()
        };

        let port = if let Some(port) = cli.port {
            port
        } else if let Ok(raw) = std::env::var("GARDEN_PORT") {
            raw.parse()
                .with_context(|| format!("GARDEN_PORT is not a valid port: {raw:?}"))?
        } else if let Some(ref cfg) = file {
            cfg.server.port
        } else {
            DEFAULT_PORT
        };

        Ok(Self {
            db_config,
            bind,
            port,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
