use crate::api::models::{BanEntry, PerformanceRecord, Side, TeamPerformance};
use crate::error::AppError;
use chrono::Duration;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

use super::best_player::{select_best_player, ChampionPlayerRecord, GameOutcome};
use super::catalog::ChampionCatalog;
use super::metric::{self, format_optional_duration, Metric};
use super::player_stats::PlayerKey;
use super::table::TableRow;
use super::NameLookup;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickTotals {
    pub wins: u32,
    pub losses: u32,
    pub blue: u32,
    pub red: u32,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub time_played: i64,
    pub damage: i64,
    pub gold: i64,
    pub gold_diff_8: i64,
    pub xp_diff_8: i64,
    pub cs_diff_8: i64,
    pub gold_diff_14: i64,
    pub xp_diff_14: i64,
    pub cs_diff_14: i64,
    pub games: Vec<GameOutcome>,
}

impl PickTotals {
    pub fn picks(&self) -> u32 {
        self.blue + self.red
    }

    fn add(&mut self, p: &PerformanceRecord) {
        if p.win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        match p.side() {
            Side::Blue => self.blue += 1,
            Side::Red => self.red += 1,
        }
        self.kills += p.kills;
        self.deaths += p.deaths;
        self.assists += p.assists;
        self.cs += p.cs;
        self.time_played += p.time;
        self.damage += p.damage;
        self.gold += p.gold;
        self.gold_diff_8 += p.gold_diff_8.unwrap_or(0);
        self.xp_diff_8 += p.xp_diff_8.unwrap_or(0);
        self.cs_diff_8 += p.cs_diff_8.unwrap_or(0);
        self.gold_diff_14 += p.gold_diff_14.unwrap_or(0);
        self.xp_diff_14 += p.xp_diff_14.unwrap_or(0);
        self.cs_diff_14 += p.cs_diff_14.unwrap_or(0);
        self.games.push(GameOutcome {
            player: PlayerKey::of(p),
            win: p.win,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanTotals {
    pub blue: u32,
    pub red: u32,
    pub pick_turns: Vec<i64>,
}

impl BanTotals {
    pub fn total(&self) -> u32 {
        self.blue + self.red
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionTotals {
    pub picks: PickTotals,
    pub bans: BanTotals,
}

/// Best player on a champion, with the resolved display name.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPlayer {
    pub name: String,
    pub record: ChampionPlayerRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionRow {
    pub champion_id: i64,
    pub name: String,
    pub picks: u32,
    pub bans: u32,
    pub presence: Metric,
    /// `None` when the champion was never picked.
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_rate: Metric,
    pub kda: Metric,
    pub average_ban_turn: Metric,
    pub game_time: Option<Duration>,
    pub cs_per_min: Metric,
    pub damage_per_min: Metric,
    pub gold_per_min: Metric,
    pub cs_diff_8: Metric,
    pub gold_diff_8: Metric,
    pub xp_diff_8: Metric,
    pub cs_diff_14: Metric,
    pub gold_diff_14: Metric,
    pub xp_diff_14: Metric,
    pub best_player: Option<BestPlayer>,
}

impl ChampionRow {
    fn summarize(
        champion_id: i64,
        name: &str,
        totals: &ChampionTotals,
        distinct_games: usize,
        names: &dyn NameLookup,
    ) -> Self {
        let p = &totals.picks;
        let picks = p.picks();
        let bans = totals.bans.total();
        let per_pick = |total: i64| Metric::ratio(total as f64, picks as f64);
        let best_player = select_best_player(&p.games).map(|record| BestPlayer {
            name: names.display_name(&record.player.player_id),
            record,
        });

        ChampionRow {
            champion_id,
            name: name.to_string(),
            picks,
            bans,
            presence: Metric::ratio((picks + bans) as f64, distinct_games as f64),
            wins: (picks > 0).then_some(p.wins),
            losses: (picks > 0).then_some(p.losses),
            win_rate: Metric::ratio(p.wins as f64, picks as f64),
            kda: if picks > 0 {
                Metric::kda(p.kills, p.deaths, p.assists)
            } else {
                Metric::NotApplicable
            },
            average_ban_turn: metric::mean(&totals.bans.pick_turns),
            game_time: metric::average_duration(p.time_played, picks),
            cs_per_min: Metric::per_minute(p.cs as f64, p.time_played),
            damage_per_min: Metric::per_minute(p.damage as f64, p.time_played),
            gold_per_min: Metric::per_minute(p.gold as f64, p.time_played),
            cs_diff_8: per_pick(p.cs_diff_8),
            gold_diff_8: per_pick(p.gold_diff_8),
            xp_diff_8: per_pick(p.xp_diff_8),
            cs_diff_14: per_pick(p.cs_diff_14),
            gold_diff_14: per_pick(p.gold_diff_14),
            xp_diff_14: per_pick(p.xp_diff_14),
            best_player,
        }
    }
}

fn optional_count(count: Option<u32>) -> String {
    count.map(|c| c.to_string()).unwrap_or_default()
}

impl TableRow for ChampionRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Name", "Picks", "Bans", "Presence", "Wins", "Losses", "Winrate", "KDA", "AVG BT",
            "GT", "CS/M", "DPM", "GPM", "CSD@8", "GD@8", "XPD@8", "CSD@14", "GD@14", "XPD@14",
            "BP Team", "Best Player", "BP Picks", "BP Win%", "BP KDA",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let bp = self.best_player.as_ref();
        vec![
            self.name.clone(),
            self.picks.to_string(),
            self.bans.to_string(),
            self.presence.percent(),
            optional_count(self.wins),
            optional_count(self.losses),
            self.win_rate.percent(),
            self.kda.fixed(1),
            self.average_ban_turn.fixed(1),
            format_optional_duration(&self.game_time),
            self.cs_per_min.fixed(1),
            self.damage_per_min.whole(),
            self.gold_per_min.whole(),
            self.cs_diff_8.fixed(1),
            self.gold_diff_8.whole(),
            self.xp_diff_8.whole(),
            self.cs_diff_14.fixed(1),
            self.gold_diff_14.whole(),
            self.xp_diff_14.whole(),
            bp.map(|b| b.record.player.team.clone()).unwrap_or_default(),
            bp.map(|b| b.name.clone()).unwrap_or_default(),
            optional_count(bp.map(|b| b.record.games)),
            bp.map(|b| b.record.win_rate().percent()).unwrap_or_default(),
            bp.map(|b| b.record.kda().fixed(1)).unwrap_or_default(),
        ]
    }
}

/// Folds picks and bans per champion id for one reporting run.
pub struct ChampionAggregator<'a> {
    catalog: &'a ChampionCatalog,
    champions: HashMap<i64, ChampionTotals>,
    match_ids: HashSet<String>,
}

impl<'a> ChampionAggregator<'a> {
    pub fn new(catalog: &'a ChampionCatalog) -> Self {
        ChampionAggregator {
            catalog,
            champions: HashMap::new(),
            match_ids: HashSet::new(),
        }
    }

    fn entry(&mut self, champion_id: i64) -> &mut ChampionTotals {
        self.champions.entry(champion_id).or_default()
    }

    fn count_match(&mut self, match_id: &str) {
        self.match_ids.insert(match_id.to_string());
    }

    pub fn fold_pick(&mut self, record: &PerformanceRecord) {
        self.count_match(&record.match_id);
        self.entry(record.champion_id).picks.add(record);
    }

    pub fn fold_ban(&mut self, match_id: &str, ban: &BanEntry, side: Side) {
        self.count_match(match_id);
        self.add_ban(ban, side);
    }

    fn add_ban(&mut self, ban: &BanEntry, side: Side) {
        let bans = &mut self.entry(ban.champion_id).bans;
        match side {
            Side::Blue => bans.blue += 1,
            Side::Red => bans.red += 1,
        }
        bans.pick_turns.push(ban.pick_turn);
    }

    pub fn fold_team_performance(&mut self, record: &TeamPerformance) {
        self.count_match(&record.match_id);
        for ban in &record.bans {
            self.add_ban(ban, record.side());
        }
    }

    pub fn fold_picks<'r, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'r PerformanceRecord>,
    {
        info!("Extracting picks from performances");
        for record in records {
            self.fold_pick(record);
        }
    }

    pub fn fold_bans<'r, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'r TeamPerformance>,
    {
        info!("Extracting bans from team performances");
        for record in records {
            self.fold_team_performance(record);
        }
    }

    /// Number of distinct matches seen across picks and bans.
    pub fn distinct_games(&self) -> usize {
        self.match_ids.len()
    }

    pub fn totals(&self, champion_id: i64) -> Option<&ChampionTotals> {
        self.champions.get(&champion_id)
    }

    /// One row per catalog champion, ordered by presence, picks, then name.
    pub fn finalize(&self, names: &dyn NameLookup) -> Result<Vec<ChampionRow>, AppError> {
        if let Some(unknown) = self
            .champions
            .keys()
            .filter(|id| !self.catalog.contains(**id))
            .min()
        {
            return Err(AppError::UnknownChampion(*unknown));
        }

        let empty = ChampionTotals::default();
        let mut rows: Vec<ChampionRow> = self
            .catalog
            .iter()
            .map(|(id, entry)| {
                let totals = self.champions.get(&id).unwrap_or(&empty);
                ChampionRow::summarize(id, &entry.name, totals, self.distinct_games(), names)
            })
            .collect();

        rows.sort_by(|a, b| {
            b.presence
                .rank_cmp(&a.presence)
                .then_with(|| b.picks.cmp(&a.picks))
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!(
            "Finalized {} champion rows over {} games",
            rows.len(),
            self.distinct_games()
        );
        Ok(rows)
    }
}
