use std::cmp::Ordering;
use std::collections::HashMap;

use super::metric::Metric;
use super::player_stats::PlayerKey;

/// One pick of a champion, kept so the best player can be chosen at finalize.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub player: PlayerKey,
    pub win: bool,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
}

/// A player's record on a single champion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionPlayerRecord {
    pub player: PlayerKey,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
}

impl ChampionPlayerRecord {
    fn new(player: PlayerKey) -> Self {
        ChampionPlayerRecord {
            player,
            games: 0,
            wins: 0,
            losses: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
        }
    }

    fn add(&mut self, game: &GameOutcome) {
        self.games += 1;
        if game.win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.kills += game.kills;
        self.deaths += game.deaths;
        self.assists += game.assists;
    }

    pub fn win_rate(&self) -> Metric {
        Metric::ratio(self.wins as f64, self.games as f64)
    }

    /// KDA rounded to one decimal, the precision it is ranked at.
    pub fn kda(&self) -> Metric {
        Metric::kda(self.kills, self.deaths, self.assists).round_to(1)
    }

    /// Wins desc, KDA desc, losses asc, kills desc, then player key so the
    /// result does not depend on the order games were folded in.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then_with(|| other.kda().rank_cmp(&self.kda()))
            .then_with(|| self.losses.cmp(&other.losses))
            .then_with(|| other.kills.cmp(&self.kills))
            .then_with(|| self.player.cmp(&other.player))
    }
}

/// Groups outcomes by player and returns every player's record, best first.
pub fn rank_players(games: &[GameOutcome]) -> Vec<ChampionPlayerRecord> {
    let mut by_player: HashMap<&PlayerKey, ChampionPlayerRecord> = HashMap::new();
    for game in games {
        by_player
            .entry(&game.player)
            .or_insert_with(|| ChampionPlayerRecord::new(game.player.clone()))
            .add(game);
    }

    let mut records: Vec<ChampionPlayerRecord> = by_player.into_values().collect();
    records.sort_by(|a, b| a.rank(b));
    records
}

/// `None` when the champion was never picked.
pub fn select_best_player(games: &[GameOutcome]) -> Option<ChampionPlayerRecord> {
    rank_players(games).into_iter().next()
}
