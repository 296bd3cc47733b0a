/// Wire types for the cdn.nba.com live box-score document.
/// Endpoint: https://cdn.nba.com/static/json/liveData/boxscore/boxscore_{game_id}.json
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct LiveBoxScoreResponse {
    pub game: Option<LiveGame>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LiveGame {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_status_text: String,
    pub home_team: Option<LiveTeam>,
    pub away_team: Option<LiveTeam>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LiveTeam {
    pub team_id: Option<i64>,
    pub team_city: Option<String>,
    pub team_name: Option<String>,
    pub team_tricode: Option<String>,
    pub score: Option<i64>,
    /// Team-level shooting totals; absent on some in-progress documents.
    pub statistics: Option<LiveTeamStats>,
    #[serde(default)]
    pub players: Vec<LivePlayer>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LiveTeamStats {
    pub field_goals_made: Option<u16>,
    pub field_goals_attempted: Option<u16>,
    pub three_pointers_made: Option<u16>,
    pub three_pointers_attempted: Option<u16>,
    pub free_throws_made: Option<u16>,
    pub free_throws_attempted: Option<u16>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LivePlayer {
    pub person_id: Option<i64>,
    pub name: Option<String>,
    pub jersey_num: Option<String>,
    pub position: Option<String>,
    /// "1" for starters, "0" or absent otherwise.
    pub starter: Option<String>,
    pub statistics: Option<LivePlayerStats>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LivePlayerStats {
    pub minutes: Option<String>,
    pub points: Option<u16>,
    pub rebounds_total: Option<u16>,
    pub assists: Option<u16>,
    pub steals: Option<u16>,
    pub blocks: Option<u16>,
    pub turnovers: Option<u16>,
    pub fouls_personal: Option<u16>,
    pub field_goals_made: Option<u16>,
    pub field_goals_attempted: Option<u16>,
    pub field_goals_percentage: Option<f64>,
    pub three_pointers_made: Option<u16>,
    pub three_pointers_attempted: Option<u16>,
    pub three_pointers_percentage: Option<f64>,
    pub free_throws_made: Option<u16>,
    pub free_throws_attempted: Option<u16>,
    pub free_throws_percentage: Option<f64>,
    pub plus_minus_points: Option<f64>,
}

/// Convert the feed's ISO-8601 playing-time duration ("PT36M05.00S") to the
/// "MM:SS" clock string the rest of the pipeline consumes. Absent or
/// malformed input means the player never saw the floor, so it maps to
/// "0:00" rather than an error.
pub fn iso_minutes_to_clock(iso: &str) -> String {
    fn parse(iso: &str) -> Option<(u32, u32)> {
        let rest = iso.strip_prefix("PT")?;
        let (mins, rest) = rest.split_once('M')?;
        let secs = rest.strip_suffix('S')?;
        Some((mins.parse().ok()?, secs.parse::<f64>().ok()? as u32))
    }

    match parse(iso) {
        Some((minutes, seconds)) => format!("{minutes}:{seconds:02}"),
        None => "0:00".to_owned(),
    }
}
