use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_STATS_API_BASE: &str = "http://api.brycenaddison.com";
const DEFAULT_DDRAGON_VERSION: &str = "12.13.1";

#[derive(Debug, Clone)]
pub struct Config {
    /// Only needed to resolve player names; aggregation works without it.
    pub api_key: Option<String>,
    pub region: String,
    pub stats_api_base: String,
    pub ddragon_version: String,
    pub cache_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "na1".to_string());
        let stats_api_base = env::var("STATS_API_BASE")
            .unwrap_or_else(|_| DEFAULT_STATS_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let ddragon_version =
            env::var("DDRAGON_VERSION").unwrap_or_else(|_| DEFAULT_DDRAGON_VERSION.to_string());

        let cache_dir = match env::var("STATS_CACHE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .ok_or_else(|| {
                    AppError::ConfigError(
                        "No home directory found, set STATS_CACHE_DIR".to_string(),
                    )
                })?
                .join(".league_stats"),
        };

        Ok(Config {
            api_key,
            region,
            stats_api_base,
            ddragon_version,
            cache_dir,
        })
    }
}
