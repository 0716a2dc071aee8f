use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use league_stats::analysis::catalog::{ChampionCatalog, TeamDirectory};
use league_stats::analysis::champion_stats::ChampionAggregator;
use league_stats::analysis::player_stats::PlayerAggregator;
use league_stats::analysis::table::{SummaryTable, TableRow};
use league_stats::analysis::team_page::TeamPage;
use league_stats::analysis::team_stats::TeamAggregator;
use league_stats::api::client::ApiClient;
use league_stats::api::models::{PerformanceRecord, TeamInfo, TeamPerformance};
use league_stats::cache::{DataCache, RosterCache};
use league_stats::config::Config;
use league_stats::display::output::{display_error, display_info, display_success, display_warning, TerminalSink};
use league_stats::display::sink::{JsonSink, TableSink};
use league_stats::error::AppError;
use std::path::PathBuf;

// Team pages only show the head of each list
const TEAM_PAGE_ROWS: usize = 15;

#[derive(Parser, Debug)]
#[command(name = "League Stats")]
#[command(about = "Aggregate league performances into player, champion and team tables", long_about = None)]
struct Args {
    /// Divisions to report on (e.g. plat fri)
    #[arg(required = true)]
    divisions: Vec<String>,

    /// Rows shown per table in the terminal (default: all)
    #[arg(short, long)]
    top: Option<usize>,

    /// Also write every table as JSON into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Build the team page for this team code (repeatable, "all" for every team)
    #[arg(long = "team")]
    teams: Vec<String>,

    /// Force refresh of raw data (ignore cache)
    #[arg(long)]
    refresh: bool,

    /// Skip summoner name lookups and use cached names only
    #[arg(long)]
    offline: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    let client = ApiClient::new(config.clone());
    let data_cache = DataCache::new(&config.cache_dir.join("data"), args.refresh)?;

    display_info(&format!(
        "Loading champion catalog (Data Dragon {})",
        config.ddragon_version
    ));
    let champion_data = data_cache
        .load_or_fetch(&format!("champions_{}", config.ddragon_version), || {
            client.get_champion_data()
        })
        .context("Failed to load champion catalog")?;
    let catalog = ChampionCatalog::from_data_dragon(&champion_data, &config.ddragon_version)?;
    display_success(&format!("{} champions in catalog", catalog.len()));

    let roster_path = RosterCache::default_path(&config.cache_dir);
    let mut roster = RosterCache::load(&roster_path)?;

    for division in &args.divisions {
        report_division(division, &args, &client, &data_cache, &catalog, &mut roster)
            .with_context(|| format!("Failed to report division {}", division))?;
    }

    Ok(())
}

fn report_division(
    division: &str,
    args: &Args,
    client: &ApiClient,
    data_cache: &DataCache,
    catalog: &ChampionCatalog,
    roster: &mut RosterCache,
) -> Result<()> {
    display_info(&format!("Loading data for division {}", division));

    let performances: Vec<PerformanceRecord> = data_cache
        .load_or_fetch(&format!("{}_performances", division), || {
            client.get_performances(division)
        })?;
    let team_performances: Vec<TeamPerformance> = data_cache
        .load_or_fetch(&format!("{}_teamperformances", division), || {
            client.get_team_performances(division)
        })?;
    let teams: Vec<TeamInfo> = data_cache
        .load_or_fetch(&format!("{}_teams", division), || client.get_teams(division))?;

    if performances.is_empty() {
        return Err(AppError::EmptyDivision(division.to_string()).into());
    }
    display_success(&format!(
        "{} performances, {} team performances, {} teams",
        performances.len(),
        team_performances.len(),
        teams.len()
    ));

    let mut players = PlayerAggregator::new();
    players.fold_all(&performances);

    let mut champions = ChampionAggregator::new(catalog);
    champions.fold_picks(&performances);
    champions.fold_bans(&team_performances);

    let mut team_stats = TeamAggregator::new();
    team_stats.fold_all(&team_performances);
    let directory = TeamDirectory::new(teams);

    resolve_names(args, client, roster, players.player_ids())?;

    let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(TerminalSink::new(args.top))];
    if let Some(out) = &args.out {
        sinks.push(Box::new(JsonSink::new(out, division)?));
    }

    let player_rows = players.finalize(&*roster);
    emit(&mut sinks, SummaryTable::from_rows(&format!("{} Players", division), &player_rows))?;

    let champion_rows = champions.finalize(&*roster)?;
    emit(&mut sinks, SummaryTable::from_rows(&format!("{} Champions", division), &champion_rows))?;

    let team_rows = team_stats.finalize(&directory)?;
    emit(&mut sinks, SummaryTable::from_rows(&format!("{} Teams", division), &team_rows))?;

    if !args.teams.is_empty() {
        let page = TeamPage::new(
            &performances,
            &team_performances,
            catalog,
            &directory,
            &client.config().stats_api_base,
        );

        let codes: Vec<String> = if args.teams.iter().any(|t| t == "all") {
            directory.codes().map(String::from).collect()
        } else {
            args.teams.clone()
        };

        for code in &codes {
            let team_name = page.team_name(code)?.to_string();
            display_info(&format!("Updating team page for {}", team_name));

            let history = page.match_history(code, &*roster)?;
            emit(&mut sinks, SummaryTable::from_rows(&format!("{} Match History", team_name), &history))?;
            emit(&mut sinks, head(&format!("{} Banned By", team_name), &page.banned_by(code)?))?;
            emit(&mut sinks, head(&format!("{} Banned Against", team_name), &page.banned_against(code)?))?;
            emit(&mut sinks, head(&format!("{} Roster", team_name), &page.roster(code, &player_rows)))?;
        }
    }

    Ok(())
}

fn resolve_names<'a, I>(args: &Args, client: &ApiClient, roster: &mut RosterCache, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    if args.offline {
        return Ok(());
    }
    if !client.has_api_key() {
        display_warning("RIOT_API_KEY not set, players are shown by cached name or raw id");
        return Ok(());
    }

    let missing = roster.missing(ids);
    if missing.is_empty() {
        display_success("⚡ All player names cached");
        return Ok(());
    }

    let pb = ProgressBar::new(missing.len() as u64);
    pb.set_message("Resolving player names");
    let resolved = roster.resolve_missing(client, &missing, || pb.inc(1));
    pb.finish_with_message("✓ Player names resolved");

    roster.save().context("Failed to save roster cache")?;
    display_success(&format!("Resolved {}/{} new player names", resolved, missing.len()));
    Ok(())
}

fn head<R: TableRow>(title: &str, rows: &[R]) -> SummaryTable {
    SummaryTable::from_rows(title, &rows[..rows.len().min(TEAM_PAGE_ROWS)])
}

fn emit(sinks: &mut [Box<dyn TableSink>], table: SummaryTable) -> Result<(), AppError> {
    for sink in sinks.iter_mut() {
        sink.write_table(&table)?;
    }
    Ok(())
}
