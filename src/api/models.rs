use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn from_blueside(blueside: bool) -> Self {
        if blueside {
            Side::Blue
        } else {
            Side::Red
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Middle, Role::Bottom, Role::Utility];

    pub fn short_name(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jg",
            Role::Middle => "Mid",
            Role::Bottom => "Bot",
            Role::Utility => "Sup",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Utility => "UTILITY",
        };
        write!(f, "{}", name)
    }
}

// Differentials that are null or not integral (the source occasionally sends
// floats) are treated as missing and fold as zero.
fn integer_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64()))
}

// One player's line in one game, as served by `/performances/{division}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub puuid: String,
    pub team: String,
    pub role: Role,
    #[serde(rename = "champid")]
    pub champion_id: i64,
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub win: bool,
    pub blueside: bool,

    /// Seconds played.
    pub time: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub gold: i64,
    pub xp: i64,
    #[serde(rename = "dmg")]
    pub damage: i64,
    #[serde(rename = "vs")]
    pub vision_score: i64,
    #[serde(rename = "w")]
    pub wards_placed: i64,
    #[serde(rename = "cw")]
    pub control_wards: i64,
    #[serde(rename = "wc")]
    pub wards_cleared: i64,
    #[serde(rename = "solokills", default)]
    pub solo_kills: i64,
    #[serde(rename = "fb")]
    pub first_blood: bool,
    #[serde(rename = "fbv")]
    pub first_blood_victim: bool,
    #[serde(default)]
    pub doubles: i64,
    #[serde(default)]
    pub triples: i64,
    #[serde(default)]
    pub quadras: i64,
    #[serde(default)]
    pub pentas: i64,

    #[serde(rename = "gold8", default)]
    pub gold_at_8: i64,
    #[serde(rename = "xp8", default)]
    pub xp_at_8: i64,
    #[serde(rename = "cs8", default)]
    pub cs_at_8: i64,
    #[serde(rename = "gold14", default)]
    pub gold_at_14: i64,
    #[serde(rename = "xp14", default)]
    pub xp_at_14: i64,
    #[serde(rename = "cs14", default)]
    pub cs_at_14: i64,

    // Differentials are missing when the lane opponent could not be matched.
    #[serde(rename = "gd8", default, deserialize_with = "integer_or_none")]
    pub gold_diff_8: Option<i64>,
    #[serde(rename = "xpd8", default, deserialize_with = "integer_or_none")]
    pub xp_diff_8: Option<i64>,
    #[serde(rename = "csd8", default, deserialize_with = "integer_or_none")]
    pub cs_diff_8: Option<i64>,
    #[serde(rename = "gd14", default, deserialize_with = "integer_or_none")]
    pub gold_diff_14: Option<i64>,
    #[serde(rename = "xpd14", default, deserialize_with = "integer_or_none")]
    pub xp_diff_14: Option<i64>,
    #[serde(rename = "csd14", default, deserialize_with = "integer_or_none")]
    pub cs_diff_14: Option<i64>,

    #[serde(rename = "k15", default)]
    pub kills_at_15: i64,
    #[serde(rename = "a15", default)]
    pub assists_at_15: i64,
    #[serde(rename = "d15", default)]
    pub deaths_at_15: i64,
    #[serde(rename = "k25", default)]
    pub kills_at_25: i64,
    #[serde(rename = "a25", default)]
    pub assists_at_25: i64,
    #[serde(rename = "d25", default)]
    pub deaths_at_25: i64,

    #[serde(rename = "jgmins", default)]
    pub jungle_proximity_minutes: Option<f64>,

    #[serde(rename = "tk")]
    pub team_kills: i64,
    #[serde(rename = "td")]
    pub team_deaths: i64,
    #[serde(rename = "ta")]
    pub team_assists: i64,
    #[serde(rename = "tgold")]
    pub team_gold: i64,
    #[serde(rename = "tdmg")]
    pub team_damage: i64,
    #[serde(rename = "tvs")]
    pub team_vision_score: i64,
    #[serde(rename = "tk15", default)]
    pub team_kills_at_15: i64,
    #[serde(rename = "td15", default)]
    pub team_deaths_at_15: i64,
    #[serde(rename = "ta15", default)]
    pub team_assists_at_15: i64,
    #[serde(rename = "tk25", default)]
    pub team_kills_at_25: i64,
    #[serde(rename = "td25", default)]
    pub team_deaths_at_25: i64,
    #[serde(rename = "ta25", default)]
    pub team_assists_at_25: i64,
}

impl PerformanceRecord {
    pub fn side(&self) -> Side {
        Side::from_blueside(self.blueside)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanEntry {
    pub champion_id: i64,
    pub pick_turn: i64,
}

// One team's line in one game, as served by `/teamperformances/{division}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamPerformance {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub team: String,
    #[serde(default)]
    pub opponent: String,
    pub win: bool,
    pub blueside: bool,
    pub time: i64,

    #[serde(rename = "k")]
    pub kills: i64,
    #[serde(rename = "d")]
    pub deaths: i64,
    #[serde(rename = "a")]
    pub assists: i64,
    pub cs: i64,
    pub gold: i64,
    pub xp: i64,
    #[serde(rename = "dmg")]
    pub damage: i64,
    #[serde(rename = "vs")]
    pub vision_score: i64,
    #[serde(rename = "w")]
    pub wards_placed: i64,
    #[serde(rename = "cw")]
    pub control_wards: i64,
    #[serde(rename = "wc")]
    pub wards_cleared: i64,
    #[serde(rename = "ow", default)]
    pub opponent_wards_placed: i64,
    #[serde(rename = "fb")]
    pub first_blood: bool,

    #[serde(rename = "gd14", default, deserialize_with = "integer_or_none")]
    pub gold_diff_14: Option<i64>,
    #[serde(rename = "xpd14", default, deserialize_with = "integer_or_none")]
    pub xp_diff_14: Option<i64>,
    #[serde(rename = "csd14", default, deserialize_with = "integer_or_none")]
    pub cs_diff_14: Option<i64>,
    #[serde(rename = "k15", default)]
    pub kills_at_15: i64,
    #[serde(rename = "a15", default)]
    pub assists_at_15: i64,
    #[serde(rename = "d15", default)]
    pub deaths_at_15: i64,
    #[serde(rename = "k25", default)]
    pub kills_at_25: i64,
    #[serde(rename = "a25", default)]
    pub assists_at_25: i64,
    #[serde(rename = "d25", default)]
    pub deaths_at_25: i64,

    #[serde(rename = "bFirst")]
    pub first_baron: bool,
    #[serde(rename = "dFirst")]
    pub first_dragon: bool,
    #[serde(rename = "tFirst")]
    pub first_tower: bool,
    #[serde(rename = "hFirst")]
    pub first_herald: bool,
    #[serde(rename = "bKills")]
    pub barons: i64,
    #[serde(rename = "dKills")]
    pub dragons: i64,
    #[serde(rename = "tKills")]
    pub towers: i64,
    #[serde(rename = "hKills")]
    pub heralds: i64,
    #[serde(rename = "bGiven")]
    pub barons_conceded: i64,
    #[serde(rename = "dGiven")]
    pub dragons_conceded: i64,
    #[serde(rename = "tGiven")]
    pub towers_conceded: i64,
    #[serde(rename = "hGiven")]
    pub heralds_conceded: i64,

    #[serde(default)]
    pub bans: Vec<BanEntry>,

    /// Conference the division plays in, e.g. `fri`.
    #[serde(default)]
    pub conf: String,
    #[serde(default)]
    pub week: i64,
    #[serde(default)]
    pub game: i64,
    #[serde(rename = "startTime", default)]
    pub start_time: i64,
}

impl TeamPerformance {
    pub fn side(&self) -> Side {
        Side::from_blueside(self.blueside)
    }
}

// Entry of `/teams/{division}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

// Summoner V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub name: String,
}

// Data Dragon Champion response
#[derive(Debug, Deserialize, Serialize)]
pub struct DataDragonChampions {
    pub data: HashMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChampionInfo {
    pub id: String,
    pub name: String,
    pub key: String,
}
