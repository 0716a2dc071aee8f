use crate::api::models::{Side, TeamPerformance};
use crate::error::AppError;
use chrono::Duration;
use log::{debug, info};
use std::collections::HashMap;

use super::catalog::TeamDirectory;
use super::metric::{self, format_optional_duration, Metric};
use super::table::TableRow;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTotals {
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
    pub opponent_wards_placed: i64,
    pub first_bloods: u32,
    pub gold_diff_14: i64,
    pub xp_diff_14: i64,
    pub cs_diff_14: i64,
    pub kills_at_15: i64,
    pub assists_at_15: i64,
    pub deaths_at_15: i64,
    pub kills_at_25: i64,
    pub assists_at_25: i64,
    pub deaths_at_25: i64,
    pub first_barons: u32,
    pub first_dragons: u32,
    pub first_towers: u32,
    pub first_heralds: u32,
    pub barons: i64,
    pub dragons: i64,
    pub towers: i64,
    pub heralds: i64,
    pub barons_conceded: i64,
    pub dragons_conceded: i64,
    pub towers_conceded: i64,
    pub heralds_conceded: i64,
    pub blue_games: u32,
    pub blue_wins: u32,
    pub red_games: u32,
    pub red_wins: u32,
}

impl TeamTotals {
    pub fn add(&mut self, p: &TeamPerformance) {
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
        self.opponent_wards_placed += p.opponent_wards_placed;
        self.first_bloods += u32::from(p.first_blood);
        self.gold_diff_14 += p.gold_diff_14.unwrap_or(0);
        self.xp_diff_14 += p.xp_diff_14.unwrap_or(0);
        self.cs_diff_14 += p.cs_diff_14.unwrap_or(0);
        self.kills_at_15 += p.kills_at_15;
        self.assists_at_15 += p.assists_at_15;
        self.deaths_at_15 += p.deaths_at_15;
        self.kills_at_25 += p.kills_at_25;
        self.assists_at_25 += p.assists_at_25;
        self.deaths_at_25 += p.deaths_at_25;
        self.first_barons += u32::from(p.first_baron);
        self.first_dragons += u32::from(p.first_dragon);
        self.first_towers += u32::from(p.first_tower);
        self.first_heralds += u32::from(p.first_herald);
        self.barons += p.barons;
        self.dragons += p.dragons;
        self.towers += p.towers;
        self.heralds += p.heralds;
        self.barons_conceded += p.barons_conceded;
        self.dragons_conceded += p.dragons_conceded;
        self.towers_conceded += p.towers_conceded;
        self.heralds_conceded += p.heralds_conceded;
        match p.side() {
            Side::Blue => {
                self.blue_games += 1;
                self.blue_wins += u32::from(p.win);
            }
            Side::Red => {
                self.red_games += 1;
                self.red_wins += u32::from(p.win);
            }
        }
    }

    fn per_game(&self, total: i64) -> Metric {
        Metric::ratio(total as f64, self.games as f64)
    }

    fn rate(&self, count: u32) -> Metric {
        Metric::ratio(count as f64, self.games as f64)
    }

    fn per_minute(&self, total: i64) -> Metric {
        Metric::per_minute(total as f64, self.time)
    }
}

/// Share of an objective secured out of all that were taken in the team's games.
fn control_rate(taken: i64, conceded: i64) -> Metric {
    Metric::ratio(taken as f64, (taken + conceded) as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub code: String,
    pub name: String,
    pub logo: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: Metric,
    pub game_time: Option<Duration>,
    pub blue_wins: u32,
    pub blue_win_rate: Metric,
    pub red_wins: u32,
    pub red_win_rate: Metric,
    pub kill_death_ratio: Metric,
    pub kills_per_game: Metric,
    pub deaths_per_game: Metric,
    pub assists_per_game: Metric,
    pub kills_at_15_per_game: Metric,
    pub kills_at_25_per_game: Metric,
    pub first_blood_rate: Metric,
    pub damage_per_min: Metric,
    pub gold_per_min: Metric,
    pub gold_diff_14: Metric,
    pub cs_per_min: Metric,
    pub cs_diff_14: Metric,
    pub xp_per_min: Metric,
    pub xp_diff_14: Metric,
    pub vision_per_min: Metric,
    pub wards_per_min: Metric,
    pub control_wards_per_min: Metric,
    pub wards_cleared_per_min: Metric,
    pub ward_clear_rate: Metric,
    pub first_tower_rate: Metric,
    pub towers_per_game: Metric,
    pub towers_conceded_per_game: Metric,
    pub first_dragon_rate: Metric,
    pub dragon_control: Metric,
    pub dragons_per_game: Metric,
    pub first_herald_rate: Metric,
    pub herald_control: Metric,
    pub heralds_per_game: Metric,
    pub first_baron_rate: Metric,
    pub baron_control: Metric,
    pub barons_per_game: Metric,
}

impl TeamRow {
    fn from_totals(code: &str, name: &str, logo: &str, t: &TeamTotals) -> Self {
        TeamRow {
            code: code.to_string(),
            name: name.to_string(),
            logo: logo.to_string(),
            games: t.games,
            wins: t.wins,
            losses: t.losses,
            win_rate: t.rate(t.wins),
            game_time: metric::average_duration(t.time, t.games),
            blue_wins: t.blue_wins,
            blue_win_rate: Metric::ratio(t.blue_wins as f64, t.blue_games as f64),
            red_wins: t.red_wins,
            red_win_rate: Metric::ratio(t.red_wins as f64, t.red_games as f64),
            kill_death_ratio: Metric::ratio_or_perfect(t.kills as f64, t.deaths as f64),
            kills_per_game: t.per_game(t.kills),
            deaths_per_game: t.per_game(t.deaths),
            assists_per_game: t.per_game(t.assists),
            kills_at_15_per_game: t.per_game(t.kills_at_15),
            kills_at_25_per_game: t.per_game(t.kills_at_25),
            first_blood_rate: t.rate(t.first_bloods),
            damage_per_min: t.per_minute(t.damage),
            gold_per_min: t.per_minute(t.gold),
            gold_diff_14: t.per_game(t.gold_diff_14),
            cs_per_min: t.per_minute(t.cs),
            cs_diff_14: t.per_game(t.cs_diff_14),
            xp_per_min: t.per_minute(t.xp),
            xp_diff_14: t.per_game(t.xp_diff_14),
            vision_per_min: t.per_minute(t.vision_score),
            wards_per_min: t.per_minute(t.wards_placed),
            control_wards_per_min: t.per_minute(t.control_wards),
            wards_cleared_per_min: t.per_minute(t.wards_cleared),
            ward_clear_rate: Metric::ratio(t.wards_cleared as f64, t.opponent_wards_placed as f64),
            first_tower_rate: t.rate(t.first_towers),
            towers_per_game: t.per_game(t.towers),
            towers_conceded_per_game: t.per_game(t.towers_conceded),
            first_dragon_rate: t.rate(t.first_dragons),
            dragon_control: control_rate(t.dragons, t.dragons_conceded),
            dragons_per_game: t.per_game(t.dragons),
            first_herald_rate: t.rate(t.first_heralds),
            herald_control: control_rate(t.heralds, t.heralds_conceded),
            heralds_per_game: t.per_game(t.heralds),
            first_baron_rate: t.rate(t.first_barons),
            baron_control: control_rate(t.barons, t.barons_conceded),
            barons_per_game: t.per_game(t.barons),
        }
    }
}

impl TableRow for TeamRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Team", "Team Code", "Team Name", "Games", "Wins", "Losses", "Win Rate", "Time",
            "Blue Wins", "Blue Win%", "Red Wins", "Red Win%", "K/D", "Kills/g", "Deaths/g",
            "Assists/g", "Kills@15", "Kills@25", "FB%", "DMG/min", "Gold/min", "GD@14", "CS/min",
            "CSD@14", "XP/min", "XPD@14", "VS/min", "Ward/min", "CW/min", "WC/min", "WC%", "FT%",
            "Tower/g", "TG/g", "FD%", "Drag%", "Drag/g", "FH%", "Rift%", "Rift/g", "FBaron%",
            "Baron%", "Baron/g",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.logo.clone(),
            self.code.clone(),
            self.name.clone(),
            self.games.to_string(),
            self.wins.to_string(),
            self.losses.to_string(),
            self.win_rate.percent(),
            format_optional_duration(&self.game_time),
            self.blue_wins.to_string(),
            self.blue_win_rate.percent(),
            self.red_wins.to_string(),
            self.red_win_rate.percent(),
            self.kill_death_ratio.fixed(2),
            self.kills_per_game.fixed(2),
            self.deaths_per_game.fixed(2),
            self.assists_per_game.fixed(2),
            self.kills_at_15_per_game.fixed(2),
            self.kills_at_25_per_game.fixed(2),
            self.first_blood_rate.percent(),
            self.damage_per_min.fixed(2),
            self.gold_per_min.fixed(2),
            self.gold_diff_14.fixed(2),
            self.cs_per_min.fixed(2),
            self.cs_diff_14.fixed(2),
            self.xp_per_min.fixed(2),
            self.xp_diff_14.fixed(2),
            self.vision_per_min.fixed(2),
            self.wards_per_min.fixed(2),
            self.control_wards_per_min.fixed(2),
            self.wards_cleared_per_min.fixed(2),
            self.ward_clear_rate.percent(),
            self.first_tower_rate.percent(),
            self.towers_per_game.fixed(2),
            self.towers_conceded_per_game.fixed(2),
            self.first_dragon_rate.percent(),
            self.dragon_control.percent(),
            self.dragons_per_game.fixed(2),
            self.first_herald_rate.percent(),
            self.herald_control.percent(),
            self.heralds_per_game.fixed(2),
            self.first_baron_rate.percent(),
            self.baron_control.percent(),
            self.barons_per_game.fixed(2),
        ]
    }
}

#[derive(Debug, Default)]
pub struct TeamAggregator {
    teams: HashMap<String, TeamTotals>,
}

impl TeamAggregator {
    pub fn new() -> Self {
        TeamAggregator {
            teams: HashMap::new(),
        }
    }

    pub fn fold(&mut self, record: &TeamPerformance) {
        self.teams
            .entry(record.team.clone())
            .or_default()
            .add(record);
    }

    pub fn fold_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a TeamPerformance>,
    {
        for record in records {
            self.fold(record);
        }
        info!("Folded team performances for {} teams", self.teams.len());
    }

    pub fn totals(&self, code: &str) -> Option<&TeamTotals> {
        self.teams.get(code)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Best win rate first; shorter average games break ties.
    ///
    /// Every folded team code must be listed in `directory`.
    pub fn finalize(&self, directory: &TeamDirectory) -> Result<Vec<TeamRow>, AppError> {
        let mut rows = self
            .teams
            .iter()
            .map(|(code, totals)| {
                let team = directory.get(code)?;
                Ok(TeamRow::from_totals(code, &team.name, &team.logo, totals))
            })
            .collect::<Result<Vec<TeamRow>, AppError>>()?;

        rows.sort_by(|a, b| {
            b.win_rate
                .rank_cmp(&a.win_rate)
                .then_with(|| a.game_time.cmp(&b.game_time))
                .then_with(|| a.code.cmp(&b.code))
        });

        debug!("Finalized {} team rows", rows.len());
        Ok(rows)
    }
}
