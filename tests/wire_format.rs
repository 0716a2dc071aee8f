use league_stats::analysis::catalog::{ChampionCatalog, TeamDirectory};
use league_stats::analysis::champion_stats::ChampionAggregator;
use league_stats::analysis::metric::Metric;
use league_stats::analysis::player_stats::PlayerAggregator;
use league_stats::analysis::team_stats::TeamAggregator;
use league_stats::api::models::{PerformanceRecord, Role, TeamInfo, TeamPerformance};

// Two players from one game as served by `/performances/{division}`; the
// second has no early-game columns at all and null differentials.
const PERFORMANCES: &str = r#"[
    {
        "puuid": "p-mid", "team": "AB", "role": "MIDDLE", "champid": 1, "matchId": "NA1_100",
        "win": true, "blueside": true, "time": 1800,
        "kills": 6, "deaths": 0, "assists": 4, "cs": 270, "gold": 13000, "xp": 14000,
        "dmg": 24000, "vs": 30, "w": 10, "cw": 3, "wc": 4, "solokills": 2,
        "fb": true, "fbv": false, "doubles": 1, "triples": 0, "quadras": 0, "pentas": 0,
        "gold8": 3100, "xp8": 3600, "cs8": 70, "gold14": 5600, "xp14": 6900, "cs14": 125,
        "gd8": 250, "xpd8": 180, "csd8": 9, "gd14": 900, "xpd14": 410, "csd14": 15,
        "k15": 2, "a15": 1, "d15": 0, "k25": 4, "a25": 3, "d25": 0, "jgmins": null,
        "tk": 20, "td": 8, "ta": 41, "tgold": 60000, "tdmg": 80000, "tvs": 120,
        "tk15": 5, "td15": 2, "ta15": 9, "tk25": 12, "td25": 5, "ta25": 25
    },
    {
        "puuid": "p-jg", "team": "CD", "role": "JUNGLE", "champid": 2, "matchId": "NA1_100",
        "win": false, "blueside": false, "time": 1800,
        "kills": 1, "deaths": 5, "assists": 3, "cs": 150, "gold": 8000, "xp": 10000,
        "dmg": 9000, "vs": 40, "w": 8, "cw": 5, "wc": 6,
        "fb": false, "fbv": true,
        "gd8": null, "xpd8": null, "csd8": null, "gd14": null, "xpd14": null, "csd14": 3.5,
        "jgmins": 6.5,
        "tk": 8, "td": 20, "ta": 14, "tgold": 48000, "tdmg": 52000, "tvs": 130
    }
]"#;

// Both sides of the same game as served by `/teamperformances/{division}`.
const TEAM_PERFORMANCES: &str = r#"[
    {
        "matchId": "NA1_100", "team": "AB", "opponent": "CD", "win": true, "blueside": true,
        "time": 1800, "k": 20, "d": 8, "a": 41, "cs": 1000, "gold": 60000, "xp": 70000,
        "dmg": 80000, "vs": 120, "w": 45, "cw": 12, "wc": 20, "ow": 40, "fb": true,
        "gd14": 2500, "xpd14": 1800, "csd14": 30,
        "k15": 5, "a15": 9, "d15": 2, "k25": 12, "a25": 25, "d25": 5,
        "bFirst": true, "dFirst": true, "tFirst": true, "hFirst": false,
        "bKills": 1, "dKills": 3, "tKills": 9, "hKills": 0,
        "bGiven": 0, "dGiven": 1, "tGiven": 2, "hGiven": 2,
        "bans": [
            {"championId": 3, "pickTurn": 1},
            {"championId": 4, "pickTurn": 3}
        ],
        "conf": "fri", "week": 2, "game": 1, "startTime": 1660000000
    },
    {
        "matchId": "NA1_100", "team": "CD", "opponent": "AB", "win": false, "blueside": false,
        "time": 1800, "k": 8, "d": 20, "a": 14, "cs": 850, "gold": 48000, "xp": 60000,
        "dmg": 52000, "vs": 130, "w": 50, "cw": 14, "wc": 18, "ow": 45, "fb": false,
        "gd14": null, "xpd14": null, "csd14": null,
        "bFirst": false, "dFirst": false, "tFirst": false, "hFirst": true,
        "bKills": 0, "dKills": 1, "tKills": 2, "hKills": 2,
        "bGiven": 1, "dGiven": 3, "tGiven": 9, "hGiven": 0,
        "bans": [
            {"championId": 5, "pickTurn": 2}
        ],
        "week": 2, "game": 1
    }
]"#;

fn catalog() -> ChampionCatalog {
    let mut catalog = ChampionCatalog::new("12.13.1");
    catalog.insert(1, "Annie", "Annie");
    catalog.insert(2, "Olaf", "Olaf");
    catalog.insert(3, "Galio", "Galio");
    catalog.insert(4, "TwistedFate", "TwistedFate");
    catalog.insert(5, "Kayle", "Kayle");
    catalog
}

fn directory() -> TeamDirectory {
    TeamDirectory::new(
        serde_json::from_str::<Vec<TeamInfo>>(
            r#"[
                {"code": "AB", "name": "Alpha Bravo", "logo": "http://logos.example.com/ab.png"},
                {"code": "CD", "name": "Charlie Delta"}
            ]"#,
        )
        .unwrap(),
    )
}

fn raw(id: &str) -> String {
    id.to_string()
}

fn performances() -> Vec<PerformanceRecord> {
    serde_json::from_str(PERFORMANCES).unwrap()
}

fn team_performances() -> Vec<TeamPerformance> {
    serde_json::from_str(TEAM_PERFORMANCES).unwrap()
}

#[test]
fn parses_performance_records() {
    let records = performances();
    assert_eq!(records.len(), 2);

    let mid = &records[0];
    assert_eq!(mid.role, Role::Middle);
    assert_eq!(mid.champion_id, 1);
    assert_eq!(mid.match_id, "NA1_100");
    assert_eq!(mid.damage, 24000);
    assert_eq!(mid.team_kills, 20);
    assert_eq!(mid.gold_diff_14, Some(900));
    assert_eq!(mid.jungle_proximity_minutes, None);

    let jungle = &records[1];
    assert_eq!(jungle.solo_kills, 0);
    assert_eq!(jungle.gold_at_8, 0);
    assert_eq!(jungle.gold_diff_8, None);
    assert_eq!(jungle.cs_diff_14, None);
    assert_eq!(jungle.jungle_proximity_minutes, Some(6.5));
}

#[test]
fn parses_team_performances_with_bans() {
    let games = team_performances();
    let ab = &games[0];
    assert_eq!((ab.kills, ab.deaths, ab.assists), (20, 8, 41));
    assert_eq!((ab.barons, ab.dragons_conceded), (1, 1));
    assert_eq!(ab.bans.len(), 2);
    assert_eq!(ab.bans[1].champion_id, 4);
    assert_eq!(ab.bans[1].pick_turn, 3);
    assert_eq!(ab.conf, "fri");
    assert_eq!(ab.start_time, 1660000000);

    let cd = &games[1];
    assert_eq!(cd.gold_diff_14, None);
    assert_eq!(cd.kills_at_15, 0);
    assert_eq!(cd.conf, "");
}

#[test]
fn folds_parsed_players_with_missing_values_as_zero() {
    let mut players = PlayerAggregator::new();
    players.fold_all(&performances());
    let rows = players.finalize(&raw);

    let mid = rows.iter().find(|r| r.player_id == "p-mid").unwrap();
    assert_eq!(mid.kda, Metric::Perfect);
    assert_eq!(mid.kill_participation, Metric::Value(0.5));
    assert_eq!(mid.gold_diff_14, Metric::Value(900.0));
    assert_eq!(mid.jungle_proximity, Metric::Value(0.0));

    let jungle = rows.iter().find(|r| r.player_id == "p-jg").unwrap();
    assert_eq!(jungle.gold_diff_8, Metric::Value(0.0));
    assert_eq!(jungle.cs_diff_14, Metric::Value(0.0));
    assert_eq!(jungle.jungle_proximity, Metric::Value(0.5));
    assert_eq!(jungle.kill_assists_at_15_per_game, Metric::Value(0.0));
}

#[test]
fn folds_parsed_picks_and_bans() {
    let catalog = catalog();
    let mut champions = ChampionAggregator::new(&catalog);
    champions.fold_picks(&performances());
    champions.fold_bans(&team_performances());
    assert_eq!(champions.distinct_games(), 1);

    let rows = champions.finalize(&raw).unwrap();
    let galio = rows.iter().find(|r| r.champion_id == 3).unwrap();
    assert_eq!(galio.bans, 1);
    assert_eq!(galio.presence, Metric::Value(1.0));
    assert_eq!(galio.average_ban_turn, Metric::Value(1.0));
    assert_eq!(galio.wins, None);

    let kayle = rows.iter().find(|r| r.champion_id == 5).unwrap();
    assert_eq!(kayle.average_ban_turn, Metric::Value(2.0));
    assert_eq!(champions.totals(5).unwrap().bans.red, 1);

    let olaf = rows.iter().find(|r| r.champion_id == 2).unwrap();
    assert_eq!(olaf.picks, 1);
    assert_eq!(olaf.cs_diff_14, Metric::Value(0.0));
    assert_eq!(olaf.best_player.as_ref().unwrap().name, "p-jg");
}

#[test]
fn folds_parsed_team_games() {
    let mut teams = TeamAggregator::new();
    teams.fold_all(&team_performances());
    let rows = teams.finalize(&directory()).unwrap();

    assert_eq!(rows[0].code, "AB");
    assert_eq!(rows[0].name, "Alpha Bravo");
    assert_eq!(rows[0].dragon_control, Metric::Value(0.75));
    assert_eq!(rows[0].ward_clear_rate, Metric::Value(0.5));

    let cd = &rows[1];
    assert_eq!(cd.logo, "");
    assert_eq!(cd.gold_diff_14, Metric::Value(0.0));
    assert_eq!(cd.kills_at_15_per_game, Metric::Value(0.0));
    assert_eq!(cd.red_win_rate, Metric::Value(0.0));
    assert_eq!(cd.blue_win_rate, Metric::NotApplicable);
}
