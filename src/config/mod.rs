use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::utils::UrlUtils;

pub mod defaults;
pub mod duration_serde;

use defaults::*;
use duration_serde::duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote playlist location and cache timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_playlist_url")]
    pub playlist_url: String,
    /// How long a fetched catalog is served before it is refreshed
    #[serde(default = "default_ttl", with = "duration")]
    pub ttl: Duration,
    /// Upper bound on one fetch, connection and body included
    #[serde(default = "default_fetch_timeout", with = "duration")]
    pub fetch_timeout: Duration,
    #[serde(default = "default_connect_timeout", with = "duration")]
    pub connect_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_playlist_url() -> String {
    DEFAULT_PLAYLIST_URL.to_string()
}

fn default_ttl() -> Duration {
    DEFAULT_TTL
}

fn default_fetch_timeout() -> Duration {
    DEFAULT_FETCH_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            playlist_url: default_playlist_url(),
            ttl: default_ttl(),
            fetch_timeout: default_fetch_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.ttl.is_zero() {
            return Err(AppError::configuration("catalog.ttl must be greater than zero"));
        }
        if self.fetch_timeout.is_zero() {
            return Err(AppError::configuration(
                "catalog.fetch_timeout must be greater than zero",
            ));
        }
        UrlUtils::parse_http_url(&self.playlist_url)
            .map_err(|e| AppError::configuration(format!("catalog.playlist_url: {e}")))?;
        Ok(())
    }
}

impl Config {
    /// Layered sources: defaults, then the TOML file, then `M3U_CATALOG_*` variables
    ///
    /// Nested keys use `__`, e.g. `M3U_CATALOG_CATALOG__TTL=30m`.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
    }

    pub fn load() -> AppResult<Self> {
        Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from_file(config_file: &Path) -> AppResult<Self> {
        if config_file.exists() {
            info!("Loading configuration from: {}", config_file.display());
        } else {
            debug!(
                "Config file {} not found, using defaults and environment",
                config_file.display()
            );
        }

        Self::from_figment(Self::figment(config_file))
    }

    pub fn from_figment(figment: Figment) -> AppResult<Self> {
        let config: Config = figment
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.catalog.validate()
    }
}
