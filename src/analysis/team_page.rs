//! Per-team views built from the raw streams: bans made by and against a
//! team, its match history by role, and its roster.

use crate::api::endpoints;
use crate::api::models::{PerformanceRecord, Role, TeamPerformance};
use crate::error::AppError;
use std::collections::HashMap;

use super::catalog::{ChampionCatalog, TeamDirectory};
use super::metric::Metric;
use super::player_stats::PlayerRow;
use super::table::TableRow;
use super::NameLookup;

// Playoff weeks: the Friday conference has a shorter regular season
const FINALS_WEEK: i64 = 14;
const FRIDAY_CONF: &str = "fri";
const FRIDAY_FINALS_WEEK: i64 = 8;
const FRIDAY_LAST_REGULAR_WEEK: i64 = 5;
const LAST_REGULAR_WEEK: i64 = 7;

/// `Week N Game M` in the regular season, `Round N Game M` or `Finals Game M`
/// in playoffs.
pub fn game_label(game: &TeamPerformance) -> String {
    let friday = game.conf == FRIDAY_CONF;
    if game.week == FINALS_WEEK || (friday && game.week == FRIDAY_FINALS_WEEK) {
        format!("Finals Game {}", game.game)
    } else if friday && game.week > FRIDAY_LAST_REGULAR_WEEK {
        format!("Round {} Game {}", game.week - FRIDAY_LAST_REGULAR_WEEK, game.game)
    } else if game.week > LAST_REGULAR_WEEK {
        format!("Round {} Game {}", game.week - LAST_REGULAR_WEEK, game.game)
    } else {
        format!("Week {} Game {}", game.week, game.game)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanCount {
    pub champion_id: i64,
    pub icon: String,
    pub name: String,
    pub count: u32,
}

impl TableRow for BanCount {
    fn headers() -> Vec<&'static str> {
        vec!["Icon", "Champion", "Count"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.icon.clone(), self.name.clone(), self.count.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLine {
    pub champion: String,
    pub player: String,
    pub kda: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub match_id: String,
    /// Indexed like [`Role::ALL`]; `None` when no performance was recorded.
    pub lanes: [Option<LaneLine>; 5],
    pub win: bool,
    pub opponent: String,
    pub label: String,
    pub link: String,
}

impl TableRow for HistoryRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Top", "Top Player", "Top KDA", "Jg", "Jg Player", "Jg KDA", "Mid", "Mid Player",
            "Mid KDA", "Bot", "Bot Player", "Bot KDA", "Sup", "Sup Player", "Sup KDA", "Result",
            "Opponent", "Details",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(18);
        for lane in &self.lanes {
            match lane {
                Some(line) => {
                    cells.push(line.champion.clone());
                    cells.push(line.player.clone());
                    cells.push(line.kda.clone());
                }
                None => cells.extend([String::new(), String::new(), String::new()]),
            }
        }
        cells.push(if self.win { "Win" } else { "Loss" }.to_string());
        cells.push(self.opponent.clone());
        cells.push(format!("{} ({})", self.label, self.link));
        cells
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub name: String,
    pub role: Role,
    pub games: u32,
    pub kda: Metric,
    pub kill_participation: Metric,
    pub damage_share: Metric,
    pub gold_share: Metric,
    pub vision_share: Metric,
}

impl From<&PlayerRow> for RosterRow {
    fn from(row: &PlayerRow) -> Self {
        RosterRow {
            name: row.name.clone(),
            role: row.role,
            games: row.games,
            kda: row.kda,
            kill_participation: row.kill_participation,
            damage_share: row.damage_share,
            gold_share: row.gold_share,
            vision_share: row.vision_share,
        }
    }
}

impl TableRow for RosterRow {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Role", "Games", "KDA", "KP%", "DMG%", "Gold%", "VS%"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.short_name().to_string(),
            self.games.to_string(),
            self.kda.fixed(2),
            self.kill_participation.percent(),
            self.damage_share.percent(),
            self.gold_share.percent(),
            self.vision_share.percent(),
        ]
    }
}

pub struct TeamPage<'a> {
    team_performances: &'a [TeamPerformance],
    catalog: &'a ChampionCatalog,
    directory: &'a TeamDirectory,
    link_base: String,
    by_lane: HashMap<(&'a str, &'a str, Role), &'a PerformanceRecord>,
}

impl<'a> TeamPage<'a> {
    pub fn new(
        performances: &'a [PerformanceRecord],
        team_performances: &'a [TeamPerformance],
        catalog: &'a ChampionCatalog,
        directory: &'a TeamDirectory,
        link_base: &str,
    ) -> Self {
        let mut by_lane = HashMap::new();
        for p in performances {
            // First record wins if the source repeats a lane
            by_lane
                .entry((p.match_id.as_str(), p.team.as_str(), p.role))
                .or_insert(p);
        }
        TeamPage {
            team_performances,
            catalog,
            directory,
            link_base: link_base.to_string(),
            by_lane,
        }
    }

    pub fn team_name(&self, code: &str) -> Result<&str, AppError> {
        self.directory.name(code)
    }

    pub fn banned_by(&self, code: &str) -> Result<Vec<BanCount>, AppError> {
        self.count_bans(self.team_performances.iter().filter(|g| g.team == code))
    }

    pub fn banned_against(&self, code: &str) -> Result<Vec<BanCount>, AppError> {
        self.count_bans(self.team_performances.iter().filter(|g| g.opponent == code))
    }

    fn count_bans<'g, I>(&self, games: I) -> Result<Vec<BanCount>, AppError>
    where
        I: Iterator<Item = &'g TeamPerformance>,
    {
        let mut counts: HashMap<i64, u32> = HashMap::new();
        for game in games {
            for ban in &game.bans {
                *counts.entry(ban.champion_id).or_insert(0) += 1;
            }
        }

        let mut bans = counts
            .into_iter()
            .map(|(champion_id, count)| {
                Ok(BanCount {
                    champion_id,
                    icon: self.catalog.icon_url(champion_id)?,
                    name: self.catalog.name(champion_id)?.to_string(),
                    count,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        bans.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(bans)
    }

    /// Newest first by week, game number, then start time.
    pub fn match_history(
        &self,
        code: &str,
        names: &dyn NameLookup,
    ) -> Result<Vec<HistoryRow>, AppError> {
        let mut games: Vec<&TeamPerformance> = self
            .team_performances
            .iter()
            .filter(|g| g.team == code)
            .collect();
        games.sort_by(|a, b| {
            (b.week, b.game, b.start_time).cmp(&(a.week, a.game, a.start_time))
        });

        games
            .into_iter()
            .map(|game| {
                let mut lanes: [Option<LaneLine>; 5] = Default::default();
                for (slot, role) in lanes.iter_mut().zip(Role::ALL) {
                    if let Some(p) = self.by_lane.get(&(game.match_id.as_str(), code, role)) {
                        *slot = Some(LaneLine {
                            champion: self.catalog.name(p.champion_id)?.to_string(),
                            player: names.display_name(&p.puuid),
                            kda: format!("{}/{}/{}", p.kills, p.deaths, p.assists),
                        });
                    }
                }
                Ok(HistoryRow {
                    match_id: game.match_id.clone(),
                    lanes,
                    win: game.win,
                    opponent: self.directory.name(&game.opponent)?.to_string(),
                    label: game_label(game),
                    link: endpoints::match_details(&self.link_base, &game.match_id),
                })
            })
            .collect()
    }

    /// The team's players, most games first, then by KDA.
    pub fn roster(&self, code: &str, players: &[PlayerRow]) -> Vec<RosterRow> {
        let mut rows: Vec<&PlayerRow> = players.iter().filter(|p| p.team == code).collect();
        rows.sort_by(|a, b| {
            b.games
                .cmp(&a.games)
                .then_with(|| b.kda.rank_cmp(&a.kda))
                .then_with(|| a.name.cmp(&b.name))
        });
        rows.into_iter().map(RosterRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{BanEntry, TeamInfo};
    use crate::analysis::player_stats::PlayerAggregator;
    use rstest::rstest;

    fn catalog() -> ChampionCatalog {
        let mut catalog = ChampionCatalog::new("12.13.1");
        catalog.insert(1, "Annie", "Annie");
        catalog.insert(2, "Olaf", "Olaf");
        catalog.insert(3, "Galio", "Galio");
        catalog
    }

    fn directory() -> TeamDirectory {
        TeamDirectory::new(vec![
            TeamInfo {
                code: "AB".to_string(),
                name: "Alpha Bravo".to_string(),
                logo: String::new(),
            },
            TeamInfo {
                code: "CD".to_string(),
                name: "Charlie Delta".to_string(),
                logo: String::new(),
            },
        ])
    }

    fn team_game(match_id: &str, team: &str, opponent: &str, week: i64, bans: &[i64]) -> TeamPerformance {
        TeamPerformance {
            match_id: match_id.to_string(),
            team: team.to_string(),
            opponent: opponent.to_string(),
            win: team == "AB",
            blueside: team == "AB",
            week,
            game: 1,
            bans: bans
                .iter()
                .enumerate()
                .map(|(turn, id)| BanEntry {
                    champion_id: *id,
                    pick_turn: turn as i64 + 1,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn lane(match_id: &str, team: &str, role: Role, puuid: &str, champion_id: i64) -> PerformanceRecord {
        PerformanceRecord {
            puuid: puuid.to_string(),
            team: team.to_string(),
            role,
            champion_id,
            match_id: match_id.to_string(),
            win: team == "AB",
            kills: 4,
            deaths: 2,
            assists: 7,
            time: 1800,
            team_kills: 20,
            ..Default::default()
        }
    }

    fn raw_ids(id: &str) -> String {
        id.to_string()
    }

    #[test]
    fn counts_bans_by_and_against_team() {
        let teams = vec![
            team_game("M1", "AB", "CD", 1, &[1, 2]),
            team_game("M1", "CD", "AB", 1, &[3]),
            team_game("M2", "AB", "CD", 2, &[2]),
        ];
        let catalog = catalog();
        let directory = directory();
        let page = TeamPage::new(&[], &teams, &catalog, &directory, "http://api.example.com");

        let by = page.banned_by("AB").unwrap();
        assert_eq!(by[0].name, "Olaf");
        assert_eq!(by[0].count, 2);
        assert_eq!(by[1].name, "Annie");

        assert_eq!(
            by[0].cells(),
            vec![
                "http://ddragon.leagueoflegends.com/cdn/12.13.1/img/champion/Olaf.png",
                "Olaf",
                "2"
            ]
        );

        let against = page.banned_against("AB").unwrap();
        assert_eq!(against.len(), 1);
        assert_eq!(against[0].name, "Galio");
    }

    #[test]
    fn history_is_newest_first_with_lanes() {
        let teams = vec![
            team_game("M1", "AB", "CD", 1, &[]),
            team_game("M2", "AB", "CD", 2, &[]),
        ];
        let performances = vec![
            lane("M1", "AB", Role::Top, "top-1", 3),
            lane("M2", "AB", Role::Middle, "mid-2", 1),
            lane("M2", "CD", Role::Middle, "enemy-mid", 2),
        ];
        let catalog = catalog();
        let directory = directory();
        let page = TeamPage::new(&performances, &teams, &catalog, &directory, "http://api.example.com");

        let history = page.match_history("AB", &raw_ids).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].match_id, "M2");
        assert_eq!(history[0].opponent, "Charlie Delta");
        assert_eq!(history[0].link, "http://api.example.com/match/M2");
        assert!(history[0].lanes[0].is_none());
        let mid = history[0].lanes[2].as_ref().unwrap();
        assert_eq!(mid.champion, "Annie");
        assert_eq!(mid.player, "mid-2");
        assert_eq!(mid.kda, "4/2/7");

        let cells = history[1].cells();
        assert_eq!(cells.len(), HistoryRow::headers().len());
        assert_eq!(cells[0], "Galio");
        assert_eq!(cells[15], "Win");
        assert_eq!(cells[17], "Week 1 Game 1 (http://api.example.com/match/M1)");
    }

    #[test]
    fn unknown_opponent_is_an_error() {
        let teams = vec![team_game("M1", "AB", "XX", 1, &[])];
        let catalog = catalog();
        let directory = directory();
        let page = TeamPage::new(&[], &teams, &catalog, &directory, "http://api.example.com");
        assert!(matches!(
            page.match_history("AB", &raw_ids),
            Err(AppError::UnknownTeam(code)) if code == "XX"
        ));
    }

    #[test]
    fn roster_lists_team_players_by_games() {
        let performances = vec![
            lane("M1", "AB", Role::Top, "top", 3),
            lane("M2", "AB", Role::Top, "top", 3),
            lane("M1", "AB", Role::Middle, "mid", 1),
            lane("M1", "CD", Role::Middle, "other", 2),
        ];
        let mut players = PlayerAggregator::new();
        players.fold_all(&performances);
        let rows = players.finalize(&raw_ids);

        let catalog = catalog();
        let directory = directory();
        let page = TeamPage::new(&performances, &[], &catalog, &directory, "http://api.example.com");
        let roster = page.roster("AB", &rows);

        let names: Vec<&str> = roster.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["top", "mid"]);
        assert_eq!(roster[0].games, 2);
        assert_eq!(roster[0].cells()[1], "Top");
        assert_eq!(page.team_name("AB").unwrap(), "Alpha Bravo");
    }

    #[rstest]
    #[case::regular_season("", 3, 2, "Week 3 Game 2")]
    #[case::playoff_round("", 9, 1, "Round 2 Game 1")]
    #[case::finals("", 14, 3, "Finals Game 3")]
    #[case::friday_regular_season("fri", 5, 1, "Week 5 Game 1")]
    #[case::friday_playoff_round("fri", 7, 2, "Round 2 Game 2")]
    #[case::friday_finals("fri", 8, 1, "Finals Game 1")]
    fn labels_playoff_games(
        #[case] conf: &str,
        #[case] week: i64,
        #[case] game: i64,
        #[case] expected: &str,
    ) {
        let record = TeamPerformance {
            conf: conf.to_string(),
            week,
            game,
            ..Default::default()
        };
        assert_eq!(game_label(&record), expected);
    }
}
