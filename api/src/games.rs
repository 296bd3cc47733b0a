/// Game pairing — rebuilds two-sided games from the flat per-team game log.
/// The feed carries one row per team per game; a game exists in the output
/// only when both perspectives were found inside the requested scope.
use crate::stats::GameLogRow;
use crate::{PairedGame, TeamGameLine};
use chrono::NaiveDate;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Home-perspective matchup marker ("ATL vs. BOS").
const HOME_MARKER: &str = " vs. ";
/// Away-perspective matchup marker ("BOS @ ATL").
const AWAY_MARKER: &str = " @ ";

/// Pair every completed game for one season. The season filter runs before
/// pairing: game identifiers are not unique across seasons, and a stale
/// row must never satisfy a current-season counterpart.
pub fn season_games(rows: &[GameLogRow], season_id: &str) -> Vec<PairedGame> {
    let scoped: Vec<&GameLogRow> = rows.iter().filter(|r| r.season_id == season_id).collect();
    pair_games(&scoped)
}

/// Pair every completed game on one calendar date (date-only comparison;
/// the feed's time component was discarded at decode).
pub fn games_on_date(rows: &[GameLogRow], date: NaiveDate) -> Vec<PairedGame> {
    let scoped: Vec<&GameLogRow> = rows.iter().filter(|r| r.game_date == date).collect();
    pair_games(&scoped)
}

/// Two-pass pairing over an already scope-filtered set: index rows by game
/// identifier, then walk the home-perspective rows resolving each one's
/// away-side counterpart. Output ascends by the numeric value of the game
/// identifier.
fn pair_games(rows: &[&GameLogRow]) -> Vec<PairedGame> {
    let mut by_game: HashMap<&str, Vec<&GameLogRow>> = HashMap::new();
    for &row in rows {
        by_game.entry(row.game_id.as_str()).or_default().push(row);
    }

    let mut processed: HashSet<&str> = HashSet::new();
    let mut games = Vec::new();

    for home in rows.iter().copied().filter(|r| r.matchup.contains(HOME_MARKER)) {
        if !processed.insert(home.game_id.as_str()) {
            continue;
        }

        let away = by_game.get(home.game_id.as_str()).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .find(|r| r.team_id != home.team_id && r.matchup.contains(AWAY_MARKER))
        });

        let Some(away) = away else {
            // Only one side has posted; the game is incomplete, not an error.
            debug!("dropping game {}: no away-perspective row in scope", home.game_id);
            continue;
        };

        // "AAA vs. BBB": the provider puts the away code first.
        let (away_abbr, home_abbr) = split_matchup(&home.matchup);

        games.push(PairedGame {
            game_id: home.game_id.clone(),
            game_date: home.game_date,
            matchup: home.matchup.clone(),
            home: TeamGameLine {
                team_id: home.team_id,
                abbr: home_abbr,
                points: home.points,
            },
            away: TeamGameLine {
                team_id: away.team_id,
                abbr: away_abbr,
                points: away.points,
            },
        });
    }

    // Game identifiers are numeric-valued strings and must order as
    // numbers; lexical order misplaces ids of unequal length.
    games.sort_by_key(|g| numeric_game_id(&g.game_id));
    games
}

fn split_matchup(matchup: &str) -> (String, String) {
    match matchup.split_once(HOME_MARKER) {
        Some((away, home)) => (away.trim().to_owned(), home.trim().to_owned()),
        None => (String::new(), String::new()),
    }
}

/// Non-numeric identifiers sort after everything numeric.
fn numeric_game_id(game_id: &str) -> u64 {
    game_id.trim().parse().unwrap_or(u64::MAX)
}
