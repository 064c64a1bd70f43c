//! Configuration management for formcollector.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "formcollector";

/// Prefix for environment overrides, e.g. `FORMCOLLECTOR_SERVER__HOST`.
const ENV_PREFIX: &str = "FORMCOLLECTOR_";

/// Plain environment variable carrying the listening port.
const PORT_ENV: &str = "PORT";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. The `PORT` environment variable (for `server.port`)
/// 2. Environment variables prefixed with `FORMCOLLECTOR_`, using `__` to nest
/// 3. TOML config file at `~/.config/formcollector/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener configuration.
    pub server: ServerConfig,
    /// Template configuration.
    pub views: ViewsConfig,
    /// Static file configuration.
    pub static_files: StaticFilesConfig,
    /// Debug listing configuration.
    pub admin: AdminConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// Template configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Directory to load templates from instead of the built-in ones.
    pub template_dir: Option<PathBuf>,
}

/// Static file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served under `/public`. Defaults to the crate's bundled
    /// `public/`, so it resolves from any working directory.
    pub public_dir: PathBuf,
    /// The `dist/govuk` directory of the govuk-frontend package, served under
    /// `/assets`.
    pub govuk_frontend_dir: PathBuf,
}

/// Debug listing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount `GET /admin/submissions`. It has no authentication.
    pub listing_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
            govuk_frontend_dir: PathBuf::from("node_modules/govuk-frontend/dist/govuk"),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            listing_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A config file that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The layered figment for a given config file.
    #[must_use]
    pub fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[PORT_ENV])
                    .map(|_| "server.port".into()),
            )
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(Error::config_validation(format!(
                "server.host must be an IP address, got {:?}",
                self.server.host
            )));
        }

        if let Some(dir) = &self.views.template_dir {
            if !dir.is_dir() {
                return Err(Error::config_validation(format!(
                    "views.template_dir is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            Error::config_validation(format!(
                "server.host must be an IP address, got {:?}",
                self.server.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// The `assets` subdirectory of the govuk-frontend distribution.
    #[must_use]
    pub fn govuk_assets_dir(&self) -> PathBuf {
        self.static_files.govuk_frontend_dir.join("assets")
    }
}
