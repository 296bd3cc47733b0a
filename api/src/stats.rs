/// stats.nba.com raw wire types — the headers/rowSet result-set envelope.
/// Rows are loosely-typed value arrays; the `ColumnMap` resolver turns the
/// header list into name→index lookups once per batch, and the decode
/// functions below produce typed rows for the rest of the pipeline.
use crate::StandingsEntry;
use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatsResponse {
    #[serde(rename = "resultSets")]
    pub result_sets: Option<Vec<ResultSet>>,
}

impl StatsResponse {
    /// First result set, if the response carried any.
    pub fn first_set(&self) -> Option<&ResultSet> {
        self.result_sets.as_deref().unwrap_or_default().first()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ResultSet {
    pub name: Option<String>,
    pub headers: Option<Vec<String>>,
    #[serde(rename = "rowSet")]
    pub row_set: Option<Vec<Vec<Value>>>,
}

// ---------------------------------------------------------------------------
// Column resolver
// ---------------------------------------------------------------------------

/// A required column was absent from the result set. Fatal for the batch:
/// positional extraction without the full schema would silently misalign
/// every field after the gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMismatch {
    pub missing: Vec<String>,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result set missing required columns: {}", self.missing.join(", "))
    }
}

/// Name→index mapping for one result set's header row. The provider does
/// not guarantee column order, so every batch resolves its own map.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    by_name: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build the mapping, failing closed if any required column is absent.
    pub fn resolve(headers: &[String], required: &[&str]) -> Result<Self, SchemaMismatch> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !by_name.contains_key(**name))
            .map(|name| (*name).to_owned())
            .collect();

        if missing.is_empty() {
            Ok(Self { by_name })
        } else {
            Err(SchemaMismatch { missing })
        }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    fn cell<'a>(&self, row: &'a [Value], name: &str) -> Option<&'a Value> {
        row.get(self.index(name)?)
    }

    /// String cell; numbers are rendered, anything else decodes to "".
    pub fn string_cell(&self, row: &[Value], name: &str) -> String {
        match self.cell(row, name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Integer cell; numeric strings are accepted, malformed values
    /// decode to 0 rather than failing the row.
    pub fn i64_cell(&self, row: &[Value], name: &str) -> i64 {
        match self.cell(row, name) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
                n.as_f64().map(|f| f as i64).unwrap_or_default()
            }),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    pub fn f64_cell(&self, row: &[Value], name: &str) -> f64 {
        match self.cell(row, name) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

/// One team's statistics for one game, as fed by the game-log source. Two
/// such rows exist per completed game, one per perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLogRow {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub team_id: i64,
    pub points: i64,
    pub matchup: String,
    pub season_id: String,
}

pub const GAME_LOG_COLUMNS: [&str; 6] =
    ["GAME_ID", "GAME_DATE", "TEAM_ID", "PTS", "MATCHUP", "SEASON_ID"];

/// Decode a game-log result set into typed rows. An empty or absent rowSet
/// decodes to an empty batch; a present rowSet with required columns
/// missing is a schema failure. Rows whose date cannot be normalized are
/// skipped with a warning — one bad row never aborts the batch.
pub fn decode_game_log(set: &ResultSet) -> Result<Vec<GameLogRow>, SchemaMismatch> {
    let rows = set.row_set.as_deref().unwrap_or_default();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let headers = set.headers.as_deref().unwrap_or_default();
    let cols = ColumnMap::resolve(headers, &GAME_LOG_COLUMNS)?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let game_id = cols.string_cell(row, "GAME_ID");
        let raw_date = cols.string_cell(row, "GAME_DATE");
        let Some(game_date) = normalize_game_date(&raw_date) else {
            warn!("skipping game-log row for game {game_id:?}: bad GAME_DATE {raw_date:?}");
            continue;
        };

        out.push(GameLogRow {
            game_id,
            game_date,
            team_id: cols.i64_cell(row, "TEAM_ID"),
            points: cols.i64_cell(row, "PTS"),
            matchup: cols.string_cell(row, "MATCHUP"),
            season_id: cols.string_cell(row, "SEASON_ID"),
        });
    }
    Ok(out)
}

/// Date-only portion of a provider timestamp ("2025-01-01T00:00:00" or
/// already date-only). The time component is never significant.
pub fn normalize_game_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw).trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub const STANDINGS_COLUMNS: [&str; 9] = [
    "TeamID",
    "TeamCity",
    "TeamName",
    "Conference",
    "Division",
    "WINS",
    "LOSSES",
    "WinPCT",
    "ConferenceRecord",
];

/// Decode the persisted standings table. Display-only record strings
/// (home/road/last-ten/streak/division) are carried when present and
/// default to empty; the ranking inputs are required.
pub fn decode_standings(set: &ResultSet) -> Result<Vec<StandingsEntry>, SchemaMismatch> {
    let rows = set.row_set.as_deref().unwrap_or_default();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let headers = set.headers.as_deref().unwrap_or_default();
    let cols = ColumnMap::resolve(headers, &STANDINGS_COLUMNS)?;

    let entries = rows
        .iter()
        .map(|row| StandingsEntry {
            team_id: cols.i64_cell(row, "TeamID"),
            city: cols.string_cell(row, "TeamCity"),
            name: cols.string_cell(row, "TeamName"),
            conference: cols.string_cell(row, "Conference"),
            division: cols.string_cell(row, "Division"),
            wins: cols.i64_cell(row, "WINS").max(0) as u32,
            losses: cols.i64_cell(row, "LOSSES").max(0) as u32,
            win_pct: cols.f64_cell(row, "WinPCT"),
            home_record: cols.string_cell(row, "HOME"),
            road_record: cols.string_cell(row, "ROAD"),
            last_ten: cols.string_cell(row, "L10"),
            streak: cols.string_cell(row, "strCurrentStreak"),
            conference_record: cols.string_cell(row, "ConferenceRecord"),
            division_record: cols.string_cell(row, "DivisionRecord"),
        })
        .collect();
    Ok(entries)
}
