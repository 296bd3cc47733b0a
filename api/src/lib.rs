pub mod client;
pub mod games;
pub mod live;
pub mod rating;
pub mod standings;
pub mod stats;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of either provider's wire format
// ---------------------------------------------------------------------------

/// One team's side of a reconciled game: identity, abbreviation as it
/// appears in the matchup string, and final score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamGameLine {
    pub team_id: i64,
    pub abbr: String,
    pub points: i64,
}

/// A fully reconciled head-to-head game, built only when both the
/// home-perspective and away-perspective rows were found in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedGame {
    pub game_id: String,
    /// Date-only; the upstream timestamp's time component is discarded.
    pub game_date: NaiveDate,
    /// Provider matchup label from the home-perspective row, e.g. "ATL vs. BOS".
    pub matchup: String,
    pub home: TeamGameLine,
    pub away: TeamGameLine,
}

impl PairedGame {
    pub fn home_score(&self) -> i64 {
        self.home.points
    }

    pub fn away_score(&self) -> i64 {
        self.away.points
    }
}

/// Detailed box score for one game, both sides always populated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameDetail {
    pub game_id: String,
    pub status: String,
    pub home: TeamBoxScore,
    pub away: TeamBoxScore,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamBoxScore {
    pub team_id: i64,
    pub city: String,
    pub name: String,
    pub score: i64,
    /// Team shooting totals as supplied by the provider's team stat block.
    pub splits: rating::ShootingSplits,
    pub players: Vec<PlayerLine>,
}

/// Per-player box-score line with the derived performance rating attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerLine {
    pub player_id: i64,
    pub name: String,
    pub jersey: String,
    pub position: String,
    pub starter: bool,
    /// Clock string, "MM:SS". "0:00" for players who did not see the floor.
    pub minutes: String,
    pub points: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
    pub fouls: u16,
    pub fg_made: u16,
    pub fg_attempted: u16,
    pub fg_pct: f64,
    pub three_made: u16,
    pub three_attempted: u16,
    pub three_pct: f64,
    pub ft_made: u16,
    pub ft_attempted: u16,
    pub ft_pct: f64,
    pub plus_minus: i16,
    pub rating: f64,
}

/// One team's season record as persisted by the standings source. Win
/// percentage comes from the source and is ranked, never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StandingsEntry {
    pub team_id: i64,
    pub city: String,
    pub name: String,
    pub conference: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    /// "W-L" strings carried for display.
    pub home_record: String,
    pub road_record: String,
    pub last_ten: String,
    pub streak: String,
    pub conference_record: String,
    pub division_record: String,
}

/// A standings entry with its computed rank and games-back, both scoped to
/// the partition the view mode selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStandingsEntry {
    pub rank: u32,
    /// Half-integer precision retained; display rounding is the caller's job.
    pub games_back: f64,
    pub team: StandingsEntry,
}

/// Which partition games-back and rank are computed against. The modes are
/// mutually exclusive views over the same entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum StandingsScope {
    #[default]
    League,
    Conference,
    Division,
}

impl StandingsScope {
    pub fn label(&self) -> &'static str {
        match self {
            StandingsScope::League => "League",
            StandingsScope::Conference => "Conference",
            StandingsScope::Division => "Division",
        }
    }

    /// The partition key for an entry under this scope; the league view is
    /// a single partition.
    pub fn partition<'a>(&self, entry: &'a StandingsEntry) -> &'a str {
        match self {
            StandingsScope::League => "",
            StandingsScope::Conference => &entry.conference,
            StandingsScope::Division => &entry.division,
        }
    }
}
