//! Configuration file management for trellis.
//!
//! Provides a TOML-based config file at `~/.config/trellis/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use trellis_db::config::DbConfig;

// -----------------------------------------------------------------------
// File format
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub catalog: CatalogSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Remote catalog endpoint serving the plant JSON array.
    #[serde(default)]
    pub url: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the trellis config directory.
///
/// XDG layout on every platform: `$XDG_CONFIG_HOME/trellis` or
/// `~/.config/trellis`. The platform-native config dir is deliberately not
/// used, so the path works the same in docs and shell history everywhere.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("trellis");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("trellis")
}

/// Return the path to the trellis config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Reading and writing
// -----------------------------------------------------------------------

/// Read and parse the config file, if it exists.
pub fn read_config_file() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let parsed: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(Some(parsed))
}

/// Write the config file, creating the directory as needed.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_config_file(config: &ConfigFile, force: bool) -> Result<PathBuf> {
    let path = config_path();
    if path.exists() && !force {
        bail!(
            "config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::create_dir_all(config_dir())
        .with_context(|| format!("failed to create config directory {}", config_dir().display()))?;
    let content = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    Ok(path)
}

// -----------------------------------------------------------------------
// Resolution
// -----------------------------------------------------------------------

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct TrellisConfig {
    pub db_config: DbConfig,
    /// Remote catalog URL; `None` when never configured.
    pub catalog_url: Option<String>,
}

impl TrellisConfig {
    /// Resolve configuration from, in priority order: CLI flags, env vars
    /// (`TRELLIS_DATABASE_URL`, `TRELLIS_CATALOG_URL`), the config file,
    /// and compile-time defaults.
    pub fn resolve(
        database_url_flag: Option<&str>,
        catalog_url_flag: Option<&str>,
    ) -> Result<Self> {
        let file = read_config_file()?;

        let database_url = database_url_flag
            .map(str::to_owned)
            .or_else(|| std::env::var("TRELLIS_DATABASE_URL").ok())
            .or_else(|| file.as_ref().map(|f| f.database.url.clone()))
            .unwrap_or_else(|| DbConfig::DEFAULT_URL.to_owned());

        let catalog_url = catalog_url_flag
            .map(str::to_owned)
            .or_else(|| std::env::var("TRELLIS_CATALOG_URL").ok())
            .or_else(|| file.as_ref().and_then(|f| f.catalog.url.clone()));

        Ok(Self {
            db_config: DbConfig::new(database_url),
            catalog_url,
        })
    }

    /// The catalog URL, or an error telling the user how to set one.
    pub fn require_catalog_url(&self) -> Result<&str> {
        match self.catalog_url.as_deref() {
            Some(url) => Ok(url),
            None => bail!(
                "no catalog URL configured.\n\
                 Set TRELLIS_CATALOG_URL, pass --url, or run \
                 `trellis init --catalog-url <url>`."
            ),
        }
    }
}
