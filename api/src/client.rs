use crate::games;
use crate::live::{LiveBoxScoreResponse, LiveGame, LivePlayer, LiveTeam, LiveTeamStats, iso_minutes_to_clock};
use crate::rating::{ShootingSplits, performance_rating};
use crate::standings::rank_standings;
use crate::stats::{GameLogRow, SchemaMismatch, StatsResponse, decode_game_log, decode_standings};
use crate::{GameDetail, PairedGame, PlayerLine, RankedStandingsEntry, StandingsScope, TeamBoxScore};
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STATS_BASE: &str = "https://stats.nba.com";
const LIVE_BASE: &str = "https://cdn.nba.com";

/// stats.nba.com stalls requests that don't look like a browser.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// NBA stats client over the stats.nba.com and cdn.nba.com endpoints.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    stats_base: String,
    live_base: String,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// A required column was missing upstream; fatal for the request.
    Schema(SchemaMismatch),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Schema(e) => write!(f, "Schema error: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SchemaMismatch> for ApiError {
    fn from(e: SchemaMismatch) -> Self {
        ApiError::Schema(e)
    }
}

impl NbaApi {
    pub fn new() -> Self {
        Self::with_base_urls(STATS_BASE, LIVE_BASE)
    }

    /// Base URLs are injectable so tests can stand in for both hosts.
    pub fn with_base_urls(stats_base: impl Into<String>, live_base: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        Self {
            client: Client::builder()
                .user_agent(BROWSER_UA)
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(30),
            stats_base: stats_base.into(),
            live_base: live_base.into(),
        }
    }

    /// Every paired game of the season the identifier names, ascending by
    /// numeric game id.
    pub async fn fetch_season_games(&self, season_id: &str) -> ApiResult<Vec<PairedGame>> {
        let rows = self.fetch_game_log(season_id).await?;
        Ok(games::season_games(&rows, season_id))
    }

    /// Paired games played on one calendar date.
    pub async fn fetch_games_for_date(
        &self,
        season_id: &str,
        date: NaiveDate,
    ) -> ApiResult<Vec<PairedGame>> {
        let rows = self.fetch_game_log(season_id).await?;
        Ok(games::games_on_date(&rows, date))
    }

    /// Ranked standings with games-back for the requested view mode.
    pub async fn fetch_standings(
        &self,
        season_id: &str,
        scope: StandingsScope,
    ) -> ApiResult<Vec<RankedStandingsEntry>> {
        let season = season_label(season_id)
            .ok_or_else(|| ApiError::NotFound(format!("unrecognized season id {season_id:?}")))?;
        let url = format!(
            "{}/stats/leaguestandingsv3?LeagueID=00&Season={season}&SeasonType=Regular+Season",
            self.stats_base
        );
        let raw: StatsResponse = self.get(&url).await?;
        let Some(set) = raw.first_set() else {
            return Ok(Vec::new());
        };
        let entries = decode_standings(set)?;
        Ok(rank_standings(entries, scope))
    }

    /// Assembled box score for one game: both team stat blocks with their
    /// rating-augmented player lines. A document missing either side is
    /// NotFound — a half-populated game never reaches the caller.
    pub async fn fetch_game_detail(&self, game_id: &str) -> ApiResult<GameDetail> {
        if !is_valid_game_id(game_id) {
            return Err(ApiError::NotFound(format!("invalid game id {game_id:?}")));
        }
        let url = format!(
            "{}/static/json/liveData/boxscore/boxscore_{game_id}.json",
            self.live_base
        );
        let raw: LiveBoxScoreResponse = self.get(&url).await?;
        let game = raw
            .game
            .ok_or_else(|| ApiError::NotFound(format!("no box score published for game {game_id}")))?;
        map_game_detail(game_id, game)
    }

    async fn fetch_game_log(&self, season_id: &str) -> ApiResult<Vec<GameLogRow>> {
        let season = season_label(season_id)
            .ok_or_else(|| ApiError::NotFound(format!("unrecognized season id {season_id:?}")))?;
        let url = format!(
            "{}/stats/leaguegamefinder?LeagueID=00&Season={season}&SeasonType=Regular+Season&PlayerOrTeam=T",
            self.stats_base
        );
        let raw: StatsResponse = self.get(&url).await?;
        let Some(set) = raw.first_set() else {
            return Ok(Vec::new());
        };
        Ok(decode_game_log(set)?)
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                // Client-error statuses mean "nothing published here yet";
                // the default value decodes to an empty result downstream.
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

/// Derive the provider's Season query label from a season identifier:
/// "22025" → "2025-26".
pub fn season_label(season_id: &str) -> Option<String> {
    if season_id.len() != 5 {
        return None;
    }
    let year: u32 = season_id.strip_prefix('2')?.parse().ok()?;
    Some(format!("{year}-{:02}", (year + 1) % 100))
}

/// Live box-score ids are ten digits starting "00"; anything else is junk
/// not worth a network round trip.
pub fn is_valid_game_id(game_id: &str) -> bool {
    game_id.len() == 10 && game_id.starts_with("00") && game_id.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Mapping: live box-score wire types → assembled domain types
// ---------------------------------------------------------------------------

fn map_game_detail(game_id: &str, game: LiveGame) -> ApiResult<GameDetail> {
    let (Some(home), Some(away)) = (game.home_team, game.away_team) else {
        return Err(ApiError::NotFound(format!(
            "box score for game {game_id} is missing a side"
        )));
    };
    Ok(GameDetail {
        game_id: game_id.to_owned(),
        status: game.game_status_text,
        home: map_team_box(home),
        away: map_team_box(away),
    })
}

fn map_team_box(team: LiveTeam) -> TeamBoxScore {
    let players: Vec<PlayerLine> = team.players.iter().map(map_player).collect();
    // Totals come from the provider's team stat block; summing the roster
    // is the fallback for documents that omit it.
    let splits = team
        .statistics
        .as_ref()
        .map(team_splits)
        .unwrap_or_else(|| ShootingSplits::from_players(&players));
    TeamBoxScore {
        team_id: team.team_id.unwrap_or_default(),
        city: team.team_city.unwrap_or_default(),
        name: team.team_name.unwrap_or_default(),
        score: team.score.unwrap_or_default(),
        splits,
        players,
    }
}

fn team_splits(stats: &LiveTeamStats) -> ShootingSplits {
    ShootingSplits {
        fg_made: u32::from(stats.field_goals_made.unwrap_or_default()),
        fg_attempted: u32::from(stats.field_goals_attempted.unwrap_or_default()),
        three_made: u32::from(stats.three_pointers_made.unwrap_or_default()),
        three_attempted: u32::from(stats.three_pointers_attempted.unwrap_or_default()),
        ft_made: u32::from(stats.free_throws_made.unwrap_or_default()),
        ft_attempted: u32::from(stats.free_throws_attempted.unwrap_or_default()),
    }
}

fn map_player(p: &LivePlayer) -> PlayerLine {
    let stats = p.statistics.clone().unwrap_or_default();
    let fg_made = stats.field_goals_made.unwrap_or_default();
    let fg_attempted = stats.field_goals_attempted.unwrap_or_default();
    let three_made = stats.three_pointers_made.unwrap_or_default();
    let three_attempted = stats.three_pointers_attempted.unwrap_or_default();
    let ft_made = stats.free_throws_made.unwrap_or_default();
    let ft_attempted = stats.free_throws_attempted.unwrap_or_default();

    let mut line = PlayerLine {
        player_id: p.person_id.unwrap_or_default(),
        name: p.name.clone().unwrap_or_default(),
        jersey: p.jersey_num.clone().unwrap_or_default(),
        position: p.position.clone().unwrap_or_default(),
        starter: p.starter.as_deref() == Some("1"),
        minutes: iso_minutes_to_clock(stats.minutes.as_deref().unwrap_or_default()),
        points: stats.points.unwrap_or_default(),
        rebounds: stats.rebounds_total.unwrap_or_default(),
        assists: stats.assists.unwrap_or_default(),
        steals: stats.steals.unwrap_or_default(),
        blocks: stats.blocks.unwrap_or_default(),
        turnovers: stats.turnovers.unwrap_or_default(),
        fouls: stats.fouls_personal.unwrap_or_default(),
        fg_made,
        fg_attempted,
        fg_pct: stats
            .field_goals_percentage
            .unwrap_or_else(|| fraction(fg_made, fg_attempted)),
        three_made,
        three_attempted,
        three_pct: stats
            .three_pointers_percentage
            .unwrap_or_else(|| fraction(three_made, three_attempted)),
        ft_made,
        ft_attempted,
        ft_pct: stats
            .free_throws_percentage
            .unwrap_or_else(|| fraction(ft_made, ft_attempted)),
        plus_minus: stats.plus_minus_points.unwrap_or_default() as i16,
        rating: 0.0,
    };
    line.rating = performance_rating(&line);
    line
}

fn fraction(made: u16, attempted: u16) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        f64::from(made) / f64::from(attempted)
    }
}
