use crate::api::models::{PerformanceRecord, Role};
use log::{debug, info};
use std::collections::HashMap;

use super::metric::Metric;
use super::table::TableRow;
use super::NameLookup;

// Jungle proximity is sampled over the first 13 minutes of each game
const JUNGLE_PROXIMITY_WINDOW_MINUTES: f64 = 13.0;

/// Same person on another team or in another role is a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey {
    pub player_id: String,
    pub team: String,
    pub role: Role,
}

impl PlayerKey {
    pub fn of(record: &PerformanceRecord) -> Self {
        PlayerKey {
            player_id: record.puuid.clone(),
            team: record.team.clone(),
            role: record.role,
        }
    }
}

/// Running sums for one player key. Fields only ever grow by addition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTotals {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub time: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub gold: i64,
    pub xp: i64,
    pub damage: i64,
    pub vision_score: i64,
    pub wards_placed: i64,
    pub control_wards: i64,
    pub wards_cleared: i64,
    pub solo_kills: i64,
    pub first_bloods: u32,
    pub first_blood_deaths: u32,
    pub doubles: i64,
    pub triples: i64,
    pub quadras: i64,
    pub pentas: i64,
    pub gold_at_8: i64,
    pub xp_at_8: i64,
    pub cs_at_8: i64,
    pub gold_at_14: i64,
    pub xp_at_14: i64,
    pub cs_at_14: i64,
    pub gold_diff_8: i64,
    pub xp_diff_8: i64,
    pub cs_diff_8: i64,
    pub gold_diff_14: i64,
    pub xp_diff_14: i64,
    pub cs_diff_14: i64,
    pub kills_at_15: i64,
    pub assists_at_15: i64,
    pub deaths_at_15: i64,
    pub kills_at_25: i64,
    pub assists_at_25: i64,
    pub deaths_at_25: i64,
    pub jungle_proximity_minutes: f64,
    pub team_kills: i64,
    pub team_deaths: i64,
    pub team_assists: i64,
    pub team_gold: i64,
    pub team_damage: i64,
    pub team_vision_score: i64,
    pub team_kills_at_15: i64,
    pub team_deaths_at_15: i64,
    pub team_assists_at_15: i64,
    pub team_kills_at_25: i64,
    pub team_deaths_at_25: i64,
    pub team_assists_at_25: i64,
}

impl PlayerTotals {
    pub fn add(&mut self, p: &PerformanceRecord) {
        self.games += 1;
        if p.win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.time += p.time;
        self.kills += p.kills;
        self.deaths += p.deaths;
        self.assists += p.assists;
        self.cs += p.cs;
        self.gold += p.gold;
        self.xp += p.xp;
        self.damage += p.damage;
        self.vision_score += p.vision_score;
        self.wards_placed += p.wards_placed;
        self.control_wards += p.control_wards;
        self.wards_cleared += p.wards_cleared;
        self.solo_kills += p.solo_kills;
        self.first_bloods += u32::from(p.first_blood);
        self.first_blood_deaths += u32::from(p.first_blood_victim);
        self.doubles += p.doubles;
        self.triples += p.triples;
        self.quadras += p.quadras;
        self.pentas += p.pentas;
        self.gold_at_8 += p.gold_at_8;
        self.xp_at_8 += p.xp_at_8;
        self.cs_at_8 += p.cs_at_8;
        self.gold_at_14 += p.gold_at_14;
        self.xp_at_14 += p.xp_at_14;
        self.cs_at_14 += p.cs_at_14;
        self.gold_diff_8 += p.gold_diff_8.unwrap_or(0);
        self.xp_diff_8 += p.xp_diff_8.unwrap_or(0);
        self.cs_diff_8 += p.cs_diff_8.unwrap_or(0);
        self.gold_diff_14 += p.gold_diff_14.unwrap_or(0);
        self.xp_diff_14 += p.xp_diff_14.unwrap_or(0);
        self.cs_diff_14 += p.cs_diff_14.unwrap_or(0);
        self.kills_at_15 += p.kills_at_15;
        self.assists_at_15 += p.assists_at_15;
        self.deaths_at_15 += p.deaths_at_15;
        self.kills_at_25 += p.kills_at_25;
        self.assists_at_25 += p.assists_at_25;
        self.deaths_at_25 += p.deaths_at_25;
        self.jungle_proximity_minutes += p.jungle_proximity_minutes.unwrap_or(0.0);
        self.team_kills += p.team_kills;
        self.team_deaths += p.team_deaths;
        self.team_assists += p.team_assists;
        self.team_gold += p.team_gold;
        self.team_damage += p.team_damage;
        self.team_vision_score += p.team_vision_score;
        self.team_kills_at_15 += p.team_kills_at_15;
        self.team_deaths_at_15 += p.team_deaths_at_15;
        self.team_assists_at_15 += p.team_assists_at_15;
        self.team_kills_at_25 += p.team_kills_at_25;
        self.team_deaths_at_25 += p.team_deaths_at_25;
        self.team_assists_at_25 += p.team_assists_at_25;
    }

    fn per_game(&self, total: i64) -> Metric {
        Metric::ratio(total as f64, self.games as f64)
    }

    fn per_minute(&self, total: i64) -> Metric {
        Metric::per_minute(total as f64, self.time)
    }
}

/// Season summary for one player key.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub player_id: String,
    pub name: String,
    pub team: String,
    pub role: Role,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: Metric,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub kda: Metric,
    pub kill_participation: Metric,
    pub kills_per_game: Metric,
    pub deaths_per_game: Metric,
    pub assists_per_game: Metric,
    pub kill_assists_at_15_per_game: Metric,
    pub kill_assists_at_25_per_game: Metric,
    pub kill_participation_at_15: Metric,
    pub kill_participation_at_25: Metric,
    pub cs_per_min: Metric,
    pub gold_per_min: Metric,
    pub damage_per_min: Metric,
    pub damage_per_gold: Metric,
    pub vision_per_min: Metric,
    pub wards_per_min: Metric,
    pub control_wards_per_min: Metric,
    pub wards_cleared_per_min: Metric,
    pub gold_diff_8: Metric,
    pub xp_diff_8: Metric,
    pub cs_diff_8: Metric,
    pub gold_diff_14: Metric,
    pub xp_diff_14: Metric,
    pub cs_diff_14: Metric,
    pub kill_share: Metric,
    pub death_share: Metric,
    pub first_blood_rate: Metric,
    pub first_blood_victim_rate: Metric,
    pub jungle_proximity: Metric,
    pub gold_share: Metric,
    pub damage_share: Metric,
    pub vision_share: Metric,
    pub solo_kills: i64,
    pub doubles: i64,
    pub triples: i64,
    pub quadras: i64,
    pub pentas: i64,
}

impl PlayerRow {
    fn from_totals(key: &PlayerKey, t: &PlayerTotals, name: String) -> Self {
        PlayerRow {
            player_id: key.player_id.clone(),
            name,
            team: key.team.clone(),
            role: key.role,
            games: t.games,
            wins: t.wins,
            losses: t.losses,
            win_rate: Metric::ratio(t.wins as f64, t.games as f64),
            kills: t.kills,
            deaths: t.deaths,
            assists: t.assists,
            kda: Metric::kda(t.kills, t.deaths, t.assists),
            kill_participation: Metric::ratio_or_perfect(
                (t.kills + t.assists) as f64,
                t.team_kills as f64,
            ),
            kills_per_game: t.per_game(t.kills),
            deaths_per_game: t.per_game(t.deaths),
            assists_per_game: t.per_game(t.assists),
            kill_assists_at_15_per_game: t.per_game(t.kills_at_15 + t.assists_at_15),
            kill_assists_at_25_per_game: t.per_game(t.kills_at_25 + t.assists_at_25),
            kill_participation_at_15: Metric::ratio_or_perfect(
                (t.kills_at_15 + t.assists_at_15) as f64,
                t.team_kills_at_15 as f64,
            ),
            kill_participation_at_25: Metric::ratio_or_perfect(
                (t.kills_at_25 + t.assists_at_25) as f64,
                t.team_kills_at_25 as f64,
            ),
            cs_per_min: t.per_minute(t.cs),
            gold_per_min: t.per_minute(t.gold),
            damage_per_min: t.per_minute(t.damage),
            damage_per_gold: Metric::ratio(t.damage as f64, t.gold as f64),
            vision_per_min: t.per_minute(t.vision_score),
            wards_per_min: t.per_minute(t.wards_placed),
            control_wards_per_min: t.per_minute(t.control_wards),
            wards_cleared_per_min: t.per_minute(t.wards_cleared),
            gold_diff_8: t.per_game(t.gold_diff_8),
            xp_diff_8: t.per_game(t.xp_diff_8),
            cs_diff_8: t.per_game(t.cs_diff_8),
            gold_diff_14: t.per_game(t.gold_diff_14),
            xp_diff_14: t.per_game(t.xp_diff_14),
            cs_diff_14: t.per_game(t.cs_diff_14),
            kill_share: Metric::ratio(t.kills as f64, t.team_kills as f64),
            death_share: Metric::ratio(t.deaths as f64, t.team_deaths as f64),
            first_blood_rate: Metric::ratio(t.first_bloods as f64, t.games as f64),
            first_blood_victim_rate: Metric::ratio(t.first_blood_deaths as f64, t.games as f64),
            jungle_proximity: Metric::ratio(
                t.jungle_proximity_minutes,
                JUNGLE_PROXIMITY_WINDOW_MINUTES * t.games as f64,
            ),
            gold_share: Metric::ratio(t.gold as f64, t.team_gold as f64),
            damage_share: Metric::ratio(t.damage as f64, t.team_damage as f64),
            vision_share: Metric::ratio(t.vision_score as f64, t.team_vision_score as f64),
            solo_kills: t.solo_kills,
            doubles: t.doubles,
            triples: t.triples,
            quadras: t.quadras,
            pentas: t.pentas,
        }
    }
}

impl TableRow for PlayerRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Name", "Team", "Role", "Games", "Wins", "Losses", "Win%", "K", "D", "A", "KDA",
            "KP%", "K/G", "D/G", "A/G", "KA@15/G", "KA@25/G", "KP@15", "KP@25", "CS/M", "GPM",
            "DPM", "DMG/Gold", "VS/M", "W/M", "CW/M", "WC/M", "GD@8", "XPD@8", "CSD@8", "GD@14",
            "XPD@14", "CSD@14", "Kill%", "Death%", "FB%", "FBV%", "JP%", "Gold%", "DMG%", "VS%",
            "Solo Kills", "Doubles", "Triples", "Quadras", "Pentas",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.team.clone(),
            self.role.to_string(),
            self.games.to_string(),
            self.wins.to_string(),
            self.losses.to_string(),
            self.win_rate.percent(),
            self.kills.to_string(),
            self.deaths.to_string(),
            self.assists.to_string(),
            self.kda.fixed(2),
            self.kill_participation.percent(),
            self.kills_per_game.fixed(2),
            self.deaths_per_game.fixed(2),
            self.assists_per_game.fixed(2),
            self.kill_assists_at_15_per_game.fixed(2),
            self.kill_assists_at_25_per_game.fixed(2),
            self.kill_participation_at_15.percent(),
            self.kill_participation_at_25.percent(),
            self.cs_per_min.fixed(1),
            self.gold_per_min.whole(),
            self.damage_per_min.whole(),
            self.damage_per_gold.fixed(2),
            self.vision_per_min.fixed(2),
            self.wards_per_min.fixed(2),
            self.control_wards_per_min.fixed(2),
            self.wards_cleared_per_min.fixed(2),
            self.gold_diff_8.whole(),
            self.xp_diff_8.whole(),
            self.cs_diff_8.fixed(1),
            self.gold_diff_14.whole(),
            self.xp_diff_14.whole(),
            self.cs_diff_14.fixed(1),
            self.kill_share.percent(),
            self.death_share.percent(),
            self.first_blood_rate.percent(),
            self.first_blood_victim_rate.percent(),
            self.jungle_proximity.percent(),
            self.gold_share.percent(),
            self.damage_share.percent(),
            self.vision_share.percent(),
            self.solo_kills.to_string(),
            self.doubles.to_string(),
            self.triples.to_string(),
            self.quadras.to_string(),
            self.pentas.to_string(),
        ]
    }
}

#[derive(Debug, Default)]
pub struct PlayerAggregator {
    players: HashMap<PlayerKey, PlayerTotals>,
}

impl PlayerAggregator {
    pub fn new() -> Self {
        PlayerAggregator {
            players: HashMap::new(),
        }
    }

    pub fn fold(&mut self, record: &PerformanceRecord) {
        self.players
            .entry(PlayerKey::of(record))
            .or_default()
            .add(record);
    }

    pub fn fold_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a PerformanceRecord>,
    {
        let before = self.players.len();
        let mut folded = 0usize;
        for record in records {
            self.fold(record);
            folded += 1;
        }
        info!(
            "Folded {} performances into {} new player entries",
            folded,
            self.players.len() - before
        );
    }

    pub fn totals(&self, key: &PlayerKey) -> Option<&PlayerTotals> {
        self.players.get(key)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(|k| k.player_id.as_str())
    }

    /// Leaderboard order: kills, then games, then win rate, all descending.
    pub fn finalize(&self, names: &dyn NameLookup) -> Vec<PlayerRow> {
        let mut rows: Vec<(&PlayerKey, PlayerRow)> = self
            .players
            .iter()
            .map(|(key, totals)| {
                let name = names.display_name(&key.player_id);
                (key, PlayerRow::from_totals(key, totals, name))
            })
            .collect();

        rows.sort_by(|(ka, a), (kb, b)| {
            b.kills
                .cmp(&a.kills)
                .then_with(|| b.games.cmp(&a.games))
                .then_with(|| b.win_rate.rank_cmp(&a.win_rate))
                .then_with(|| ka.cmp(kb))
        });

        debug!("Finalized {} player rows", rows.len());
        rows.into_iter().map(|(_, row)| row).collect()
    }
}
