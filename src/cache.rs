use crate::analysis::NameLookup;
use crate::api::client::ApiClient;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw datasets mirrored to disk so reruns don't hit the network.
pub struct DataCache {
    dir: PathBuf,
    refresh: bool,
}

impl DataCache {
    pub fn new(dir: &Path, refresh: bool) -> Result<Self, AppError> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::CacheError(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(DataCache {
            dir: dir.to_path_buf(),
            refresh,
        })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Reads `name.json` from the cache, or runs `fetch` and stores the result.
    pub fn load_or_fetch<T, F>(&self, name: &str, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, AppError>,
    {
        let path = self.path_for(name);

        if !self.refresh {
            if let Ok(content) = fs::read_to_string(&path) {
                info!("Importing {} from {}", name, path.display());
                return serde_json::from_str(&content).map_err(|e| {
                    AppError::JsonError(format!("Failed to parse {}: {}", path.display(), e))
                });
            }
        }

        info!("Downloading {} to {}", name, path.display());
        let data = fetch()?;
        write_json(&path, &data)?;
        Ok(data)
    }
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(data).map_err(|e| {
        AppError::JsonError(format!("Failed to serialize {}: {}", path.display(), e))
    })?;

    fs::write(path, json).map_err(|e| {
        AppError::CacheError(format!("Failed to write {}: {}", path.display(), e))
    })
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedPlayer {
    pub summoner_name: String,
    pub cached_at: DateTime<Utc>,
}

/// Persistent puuid to summoner name map, shared by every division.
#[derive(Debug, Serialize, Deserialize)]
pub struct RosterCache {
    #[serde(skip)]
    path: PathBuf,
    pub last_updated: DateTime<Utc>,
    pub players: HashMap<String, CachedPlayer>,
}

impl RosterCache {
    pub fn new(path: &Path) -> Self {
        RosterCache {
            path: path.to_path_buf(),
            last_updated: Utc::now(),
            players: HashMap::new(),
        }
    }

    pub fn default_path(cache_dir: &Path) -> PathBuf {
        cache_dir.join("rosters.json")
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let mut roster: RosterCache = serde_json::from_str(&content).map_err(|e| {
                    AppError::JsonError(format!("Failed to parse roster cache: {}", e))
                })?;
                roster.path = path.to_path_buf();
                debug!("Loaded {} cached names", roster.players.len());
                Ok(roster)
            }
            // First run, nothing cached yet
            Err(_) => Ok(RosterCache::new(path)),
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::CacheError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        write_json(&self.path, self)
    }

    pub fn insert(&mut self, puuid: &str, summoner_name: &str) {
        self.players.insert(
            puuid.to_string(),
            CachedPlayer {
                summoner_name: summoner_name.to_string(),
                cached_at: Utc::now(),
            },
        );
        self.last_updated = Utc::now();
    }

    pub fn get(&self, puuid: &str) -> Option<&str> {
        self.players.get(puuid).map(|p| p.summoner_name.as_str())
    }

    /// Ids not cached yet, sorted and deduplicated.
    pub fn missing<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter(|id| !id.is_empty() && !self.players.contains_key(*id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Looks up every uncached id through the Summoner API.
    ///
    /// A failed lookup is logged and skipped; the report falls back to the raw
    /// id for that player. `on_progress` is called once per id.
    pub fn resolve_missing<F>(&mut self, client: &ApiClient, ids: &[String], mut on_progress: F) -> usize
    where
        F: FnMut(),
    {
        let mut resolved = 0;
        for puuid in ids {
            match client.get_summoner(puuid) {
                Ok(summoner) => {
                    self.insert(puuid, &summoner.name);
                    resolved += 1;
                }
                Err(e) => warn!("Could not resolve {}: {}", puuid, e),
            }
            on_progress();
        }
        resolved
    }
}

impl NameLookup for RosterCache {
    fn display_name(&self, player_id: &str) -> String {
        self.get(player_id).unwrap_or(player_id).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::TeamInfo;
    use tempfile::tempdir;

    #[test]
    fn fetches_once_then_reads_from_disk() {
        let dir = tempdir().unwrap();
        let cache = DataCache::new(dir.path(), false).unwrap();

        let teams: Vec<TeamInfo> = cache
            .load_or_fetch("teams_plat", || {
                Ok(vec![TeamInfo {
                    code: "AB".to_string(),
                    name: "Alpha Bravo".to_string(),
                    logo: String::new(),
                }])
            })
            .unwrap();
        assert_eq!(teams.len(), 1);
        assert!(cache.path_for("teams_plat").exists());

        let cached: Vec<TeamInfo> = cache
            .load_or_fetch("teams_plat", || Err(AppError::HttpError("offline".to_string())))
            .unwrap();
        assert_eq!(cached[0].name, "Alpha Bravo");
    }

    #[test]
    fn refresh_ignores_cached_file() {
        let dir = tempdir().unwrap();
        DataCache::new(dir.path(), false)
            .unwrap()
            .load_or_fetch("ids", || Ok(vec![1, 2, 3]))
            .unwrap();

        let refreshed = DataCache::new(dir.path(), true).unwrap();
        let result: Result<Vec<i32>, AppError> =
            refreshed.load_or_fetch("ids", || Err(AppError::RateLimited));
        assert!(matches!(result, Err(AppError::RateLimited)));
    }

    #[test]
    fn roster_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = RosterCache::default_path(dir.path());

        let mut roster = RosterCache::load(&path).unwrap();
        assert!(roster.players.is_empty());
        roster.insert("puuid-1", "Faker");
        roster.save().unwrap();

        let reloaded = RosterCache::load(&path).unwrap();
        assert_eq!(reloaded.get("puuid-1"), Some("Faker"));
        assert_eq!(reloaded.display_name("puuid-1"), "Faker");
        assert_eq!(reloaded.display_name("unknown"), "unknown");
    }

    #[test]
    fn missing_skips_cached_and_duplicate_ids() {
        let dir = tempdir().unwrap();
        let mut roster = RosterCache::new(&RosterCache::default_path(dir.path()));
        roster.insert("known", "Known");

        let missing = roster.missing(["b", "known", "a", "b", ""]);
        assert_eq!(missing, vec!["a".to_string(), "b".to_string()]);
    }
}
