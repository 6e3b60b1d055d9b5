use serenity::model::id::GuildId;
use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_ASSET_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_LOGO_PATH: &str = "assets/tmdb-logo.png";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for talking to the TMDB API
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Settings for turning movies into cards
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub asset_url: String,
    pub logo_path: PathBuf,
}

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register commands to this guild only instead of globally
    pub test_guild_id: Option<GuildId>,
    pub tmdb: TmdbConfig,
    pub presenter: PresenterConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let discord_token = require("DISCORD_TOKEN")?;
        let api_key = require("TMDB_API_KEY")?;

        let test_guild_id = match get("TEST_GUILD_ID") {
            Some(id) => Some(
                id.trim()
                    .parse()
                    .map(GuildId)
                    .map_err(|_| ConfigError::Invalid {
                        key: "TEST_GUILD_ID",
                        value: id,
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            discord_token,
            test_guild_id,
            tmdb: TmdbConfig {
                api_key,
                base_url: get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_owned()),
                timeout: REQUEST_TIMEOUT,
            },
            presenter: PresenterConfig {
                asset_url: get("TMDB_ASSET_URL")
                    .unwrap_or_else(|| DEFAULT_TMDB_ASSET_URL.to_owned()),
                logo_path: get("TMDB_LOGO_PATH")
                    .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_owned())
                    .into(),
            },
        })
    }
}
