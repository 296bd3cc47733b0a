/// Derived per-player metrics: the composite performance rating and the
/// shooting-split aggregates used for team totals reconciliation.
use crate::PlayerLine;
use serde::Serialize;

/// Composite performance rating for one player-game line, rounded to one
/// decimal. The formula is a fixed linear contract, not a tunable model:
///
/// ```text
/// 1.0*pts + 1.2*reb + 1.5*ast + 3.0*stl + 3.0*blk - 2.0*tov + 0.5*plus_minus
///   + (fg_pct - 0.45) * 100     when fg_attempted > 0
///   + (three_pct - 0.35) * 100  when three_attempted > 0
/// ```
///
/// The percentage terms are gated on attempts so a player who never shot
/// is neither rewarded nor punished for an undefined split.
pub fn performance_rating(line: &PlayerLine) -> f64 {
    let mut rating = f64::from(line.points)
        + 1.2 * f64::from(line.rebounds)
        + 1.5 * f64::from(line.assists)
        + 3.0 * f64::from(line.steals)
        + 3.0 * f64::from(line.blocks)
        - 2.0 * f64::from(line.turnovers)
        + 0.5 * f64::from(line.plus_minus);

    if line.fg_attempted > 0 {
        rating += (line.fg_pct - 0.45) * 100.0;
    }
    if line.three_attempted > 0 {
        rating += (line.three_pct - 0.35) * 100.0;
    }

    (rating * 10.0).round() / 10.0
}

/// Decimal playing time from a "MM:SS" clock string, or a bare decimal.
/// Absent or malformed input is a valid bench state and yields 0, never an
/// error.
pub fn minutes_played(raw: &str) -> f64 {
    let raw = raw.trim();
    if let Some((minutes, seconds)) = raw.split_once(':') {
        return match (minutes.parse::<u32>(), seconds.parse::<u32>()) {
            (Ok(m), Ok(s)) => f64::from(m) + f64::from(s) / 60.0,
            _ => 0.0,
        };
    }
    raw.parse().unwrap_or(0.0)
}

/// Made/attempted totals for field goals, threes, and free throws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShootingSplits {
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
}

impl ShootingSplits {
    /// Sum the splits of every player line — the roster-derived view of a
    /// team stat block.
    pub fn from_players<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerLine>,
    {
        let mut totals = Self::default();
        for p in players {
            totals.fg_made += u32::from(p.fg_made);
            totals.fg_attempted += u32::from(p.fg_attempted);
            totals.three_made += u32::from(p.three_made);
            totals.three_attempted += u32::from(p.three_attempted);
            totals.ft_made += u32::from(p.ft_made);
            totals.ft_attempted += u32::from(p.ft_attempted);
        }
        totals
    }

    pub fn fg_pct(&self) -> f64 {
        pct(self.fg_made, self.fg_attempted)
    }

    pub fn three_pct(&self) -> f64 {
        pct(self.three_made, self.three_attempted)
    }

    pub fn ft_pct(&self) -> f64 {
        pct(self.ft_made, self.ft_attempted)
    }
}

fn pct(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        f64::from(made) / f64::from(attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PlayerLine {
        PlayerLine {
            points: 28,
            rebounds: 5,
            assists: 7,
            steals: 2,
            blocks: 0,
            turnovers: 3,
            plus_minus: 10,
            fg_pct: 0.52,
            fg_attempted: 20,
            three_pct: 0.40,
            three_attempted: 8,
            ..PlayerLine::default()
        }
    }

    #[test]
    fn rating_matches_the_fixed_formula() {
        // 28 + 6.0 + 10.5 + 6 + 0 - 6 + 5 + 7.0 + 5.0 = 61.5
        assert_eq!(performance_rating(&line()), 61.5);
    }

    #[test]
    fn rating_is_deterministic() {
        let l = line();
        assert_eq!(performance_rating(&l), performance_rating(&l));
    }

    #[test]
    fn percentage_terms_need_attempts() {
        let mut l = line();
        l.fg_attempted = 0;
        l.three_attempted = 0;
        // Counting terms only: 28 + 6.0 + 10.5 + 6 + 0 - 6 + 5 = 49.5
        assert_eq!(performance_rating(&l), 49.5);
    }

    #[test]
    fn cold_shooting_and_negative_plus_minus_drag_the_rating_down() {
        let l = PlayerLine {
            points: 4,
            turnovers: 4,
            plus_minus: -20,
            fg_pct: 0.10,
            fg_attempted: 10,
            ..PlayerLine::default()
        };
        // 4 - 8 - 10 + (0.10 - 0.45)*100 = -49.0
        assert_eq!(performance_rating(&l), -49.0);
    }

    #[test]
    fn rating_rounds_to_one_decimal() {
        // 1.2 * 3 accumulates float error below the rounding step.
        let l = PlayerLine { points: 1, rebounds: 3, ..PlayerLine::default() };
        let r = performance_rating(&l);
        assert_eq!(r, 4.6);
        assert_eq!((r * 10.0).fract(), 0.0);
    }

    #[test]
    fn clock_minutes_normalize_to_decimal() {
        assert_eq!(minutes_played("36:30"), 36.5);
        assert_eq!(minutes_played("0:00"), 0.0);
        assert_eq!(minutes_played("12:15"), 12.25);
    }

    #[test]
    fn decimal_minutes_pass_through() {
        assert_eq!(minutes_played("31.5"), 31.5);
    }

    #[test]
    fn malformed_minutes_are_a_bench_state() {
        assert_eq!(minutes_played(""), 0.0);
        assert_eq!(minutes_played("DNP"), 0.0);
        assert_eq!(minutes_played("12:xx"), 0.0);
    }

    #[test]
    fn splits_sum_across_player_lines() {
        let a = PlayerLine {
            fg_made: 7,
            fg_attempted: 12,
            three_made: 2,
            three_attempted: 5,
            ft_made: 4,
            ft_attempted: 4,
            ..PlayerLine::default()
        };
        let b = PlayerLine {
            fg_made: 3,
            fg_attempted: 8,
            three_made: 1,
            three_attempted: 3,
            ..PlayerLine::default()
        };
        let totals = ShootingSplits::from_players([&a, &b]);
        assert_eq!(totals.fg_made, 10);
        assert_eq!(totals.fg_attempted, 20);
        assert_eq!(totals.fg_pct(), 0.5);
        assert_eq!(totals.ft_attempted, 4);
        assert_eq!(totals.ft_pct(), 1.0);
    }

    #[test]
    fn zero_attempts_never_divide() {
        assert_eq!(ShootingSplits::default().fg_pct(), 0.0);
        assert_eq!(ShootingSplits::default().three_pct(), 0.0);
    }
}
