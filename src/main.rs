use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use nba_api::client::NbaApi;
use nba_api::{GameDetail, PairedGame, RankedStandingsEntry, StandingsScope};

/// Regular-season identifier for 2025-26; override with HOOPLOG_SEASON.
const DEFAULT_SEASON_ID: &str = "22025";

#[derive(Debug)]
enum Command {
    SeasonGames,
    GamesOnDate(NaiveDate),
    GameDetail(String),
    Standings(StandingsScope),
}

struct Cli {
    command: Command,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(cli) = parse_args(std::env::args().skip(1).collect()) else {
        return Ok(());
    };

    let season_id =
        std::env::var("HOOPLOG_SEASON").unwrap_or_else(|_| DEFAULT_SEASON_ID.to_owned());
    debug!("using season id {season_id}");

    let api = NbaApi::new();
    match cli.command {
        Command::SeasonGames => {
            let games = api.fetch_season_games(&season_id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else {
                print_games(&games);
            }
        }
        Command::GamesOnDate(date) => {
            let games = api.fetch_games_for_date(&season_id, date).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else {
                print_games(&games);
            }
        }
        Command::GameDetail(game_id) => {
            let detail = api.fetch_game_detail(&game_id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_game_detail(&detail);
            }
        }
        Command::Standings(scope) => {
            let ranked = api.fetch_standings(&season_id, scope).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print_standings(&ranked, scope);
            }
        }
    }

    Ok(())
}

/// None means the invocation was already handled (help/version).
fn parse_args(mut args: Vec<String>) -> Option<Cli> {
    let json = {
        let before = args.len();
        args.retain(|a| a != "--json");
        args.len() != before
    };

    let mut it = args.into_iter();
    let Some(cmd) = it.next() else {
        return Some(Cli { command: Command::SeasonGames, json });
    };

    let command = match cmd.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            return None;
        }
        "-V" | "--version" => {
            println!("hooplog {}", env!("CARGO_PKG_VERSION"));
            return None;
        }
        "games" => match it.next() {
            None => Command::SeasonGames,
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => Command::GamesOnDate(date),
                Err(_) => exit_usage(&format!("Invalid date: {raw} (expected YYYY-MM-DD)")),
            },
        },
        "game" => match it.next() {
            Some(id) => Command::GameDetail(id),
            None => exit_usage("game requires a GAME_ID"),
        },
        "standings" => match it.next().as_deref() {
            None | Some("league") => Command::Standings(StandingsScope::League),
            Some("conference") => Command::Standings(StandingsScope::Conference),
            Some("division") => Command::Standings(StandingsScope::Division),
            Some(other) => exit_usage(&format!("Unknown standings scope: {other}")),
        },
        other => exit_usage(&format!("Unknown argument: {other}")),
    };

    Some(Cli { command, json })
}

fn exit_usage(message: &str) -> ! {
    eprintln!("{message}\n\n{}", usage_text());
    std::process::exit(2);
}

fn usage_text() -> &'static str {
    "hooplog - NBA scoreboard and standings for your terminal

Usage:
  hooplog [--json] games [YYYY-MM-DD]
  hooplog [--json] game <GAME_ID>
  hooplog [--json] standings [league|conference|division]
  hooplog --help | --version

Environment:
  HOOPLOG_SEASON   Season identifier to query (default 22025)
  RUST_LOG         Log filter, e.g. debug or nba_api=debug"
}

// ---------------------------------------------------------------------------
// Plain-text output
// ---------------------------------------------------------------------------

fn print_games(games: &[PairedGame]) {
    if games.is_empty() {
        println!("No games.");
        return;
    }
    for g in games {
        println!(
            "{}  {}  {:<12} {:>3}-{:<3}",
            g.game_id,
            g.game_date,
            g.matchup,
            g.home_score(),
            g.away_score()
        );
    }
}

fn print_game_detail(detail: &GameDetail) {
    println!("Game {}  ({})", detail.game_id, detail.status);
    for team in [&detail.home, &detail.away] {
        println!();
        println!("{} {}  {}", team.city, team.name, team.score);
        println!(
            "  {:<24} {:>6} {:>4} {:>4} {:>4} {:>7} {:>6}",
            "Player", "MIN", "PTS", "REB", "AST", "FG", "RTG"
        );
        for p in &team.players {
            println!(
                "  {:<24} {:>6} {:>4} {:>4} {:>4} {:>3}-{:<3} {:>6.1}",
                p.name, p.minutes, p.points, p.rebounds, p.assists, p.fg_made, p.fg_attempted,
                p.rating
            );
        }
        println!(
            "  Team: FG {}/{} ({:.1}%)  3PT {}/{} ({:.1}%)  FT {}/{} ({:.1}%)",
            team.splits.fg_made,
            team.splits.fg_attempted,
            team.splits.fg_pct() * 100.0,
            team.splits.three_made,
            team.splits.three_attempted,
            team.splits.three_pct() * 100.0,
            team.splits.ft_made,
            team.splits.ft_attempted,
            team.splits.ft_pct() * 100.0
        );
    }
}

fn print_standings(ranked: &[RankedStandingsEntry], scope: StandingsScope) {
    if ranked.is_empty() {
        println!("No standings data.");
        return;
    }
    match scope {
        StandingsScope::League => print_standings_table(ranked),
        _ => {
            // Partition labels in first-seen (sorted) order.
            let mut labels: Vec<&str> = Vec::new();
            for r in ranked {
                let label = scope.partition(&r.team);
                if !labels.iter().any(|l| *l == label) {
                    labels.push(label);
                }
            }
            for label in labels {
                println!("{label}");
                let group: Vec<RankedStandingsEntry> = ranked
                    .iter()
                    .filter(|r| scope.partition(&r.team) == label)
                    .cloned()
                    .collect();
                print_standings_table(&group);
                println!();
            }
        }
    }
}

fn print_standings_table(rows: &[RankedStandingsEntry]) {
    println!(
        "{:>2}  {:<24} {:>3} {:>3} {:>6} {:>5}  {:<6} {}",
        "#", "Team", "W", "L", "Win%", "GB", "Conf", "Strk"
    );
    for r in rows {
        println!(
            "{:>2}  {:<24} {:>3} {:>3} {:>6.3} {:>5}  {:<6} {}",
            r.rank,
            format!("{} {}", r.team.city, r.team.name),
            r.team.wins,
            r.team.losses,
            r.team.win_pct,
            format_games_back(r.games_back),
            r.team.conference_record,
            r.team.streak
        );
    }
}

/// Display rule for games-back: the leader's zero shows as "-", everything
/// else keeps one decimal. The underlying value stays fractional.
fn format_games_back(games_back: f64) -> String {
    if games_back == 0.0 {
        "-".to_owned()
    } else {
        format!("{games_back:.1}")
    }
}
