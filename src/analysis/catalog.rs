use crate::api::endpoints;
use crate::api::models::{DataDragonChampions, TeamInfo};
use crate::error::AppError;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionEntry {
    pub name: String,
    /// Data Dragon image id, e.g. `MonkeyKing` for Wukong.
    pub icon_id: String,
}

/// Champion id to display name, scoped to one reporting run.
#[derive(Debug, Clone, Default)]
pub struct ChampionCatalog {
    champions: BTreeMap<i64, ChampionEntry>,
    version: String,
}

impl ChampionCatalog {
    pub fn new(version: &str) -> Self {
        ChampionCatalog {
            champions: BTreeMap::new(),
            version: version.to_string(),
        }
    }

    pub fn from_data_dragon(data: &DataDragonChampions, version: &str) -> Result<Self, AppError> {
        let mut catalog = ChampionCatalog::new(version);
        for info in data.data.values() {
            let id = info.key.parse::<i64>().map_err(|e| {
                AppError::JsonError(format!("Invalid champion key '{}': {}", info.key, e))
            })?;
            catalog.insert(id, &info.name, &info.id);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, id: i64, name: &str, icon_id: &str) {
        self.champions.insert(
            id,
            ChampionEntry {
                name: name.to_string(),
                icon_id: icon_id.to_string(),
            },
        );
    }

    pub fn get(&self, id: i64) -> Result<&ChampionEntry, AppError> {
        self.champions.get(&id).ok_or(AppError::UnknownChampion(id))
    }

    pub fn name(&self, id: i64) -> Result<&str, AppError> {
        self.get(id).map(|c| c.name.as_str())
    }

    pub fn icon_url(&self, id: i64) -> Result<String, AppError> {
        let entry = self.get(id)?;
        Ok(endpoints::champion_icon(&self.version, &entry.icon_id))
    }

    pub fn contains(&self, id: i64) -> bool {
        self.champions.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &ChampionEntry)> {
        self.champions.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

/// Team code to name and logo for one division.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: Vec<TeamInfo>,
    by_code: HashMap<String, usize>,
}

impl TeamDirectory {
    pub fn new(teams: Vec<TeamInfo>) -> Self {
        let by_code = teams
            .iter()
            .enumerate()
            .map(|(idx, team)| (team.code.clone(), idx))
            .collect();
        TeamDirectory { teams, by_code }
    }

    pub fn get(&self, code: &str) -> Result<&TeamInfo, AppError> {
        self.by_code
            .get(code)
            .map(|idx| &self.teams[*idx])
            .ok_or_else(|| AppError::UnknownTeam(code.to_string()))
    }

    pub fn name(&self, code: &str) -> Result<&str, AppError> {
        self.get(code).map(|t| t.name.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.code.as_str())
    }
}
