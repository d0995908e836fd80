//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Per-file path overrides and legacy restricted list
//! - 1.0.0: Initial release

use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::features::roles::RoleSeeds;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Locations of the four state documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub catalog: PathBuf,
    pub suggestion_cache: PathBuf,
    pub privileged: PathBuf,
    pub restricted: PathBuf,
}

impl StatePaths {
    /// Default file names under `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            catalog: dir.join("foods.txt"),
            suggestion_cache: dir.join("suggestion_cache.json"),
            privileged: dir.join("admins.json"),
            restricted: dir.join("restricted.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub paths: StatePaths,
    pub seeds: RoleSeeds,
    pub log_level: String,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_TOKEN").map_err(|_| anyhow!("DISCORD_TOKEN must be set"))?;
        let discord_guild_id = env::var("DISCORD_GUILD_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let defaults = StatePaths::in_dir(&data_dir);
        let paths = StatePaths {
            catalog: path_override("CATALOG_PATH", defaults.catalog),
            suggestion_cache: path_override("SUGGESTION_CACHE_PATH", defaults.suggestion_cache),
            privileged: path_override("ADMINS_PATH", defaults.privileged),
            restricted: path_override("RESTRICTED_PATH", defaults.restricted),
        };

        let seeds = RoleSeeds::new(
            parse_name_list(&env::var("BOT_ADMINS").unwrap_or_default()),
            parse_name_list(&env::var("LEGACY_RESTRICTED").unwrap_or_default()),
        );

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            paths,
            seeds,
            log_level,
        })
    }
}

fn path_override(var: &str, default: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => default,
    }
}

/// Parse a comma or whitespace separated list of usernames
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
