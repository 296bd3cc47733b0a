/// Standings ranking — win-percentage ordering with the conference-wins
/// tie-break, partition-scoped ranks, and games-back against each scope
/// leader.
use crate::{RankedStandingsEntry, StandingsEntry, StandingsScope};
use log::warn;
use std::collections::HashMap;

/// Totally order the entries and attach rank and games-back for the
/// requested view mode. Output keeps the overall sorted order; under the
/// conference and division views the rank restarts inside each partition.
pub fn rank_standings(
    entries: Vec<StandingsEntry>,
    scope: StandingsScope,
) -> Vec<RankedStandingsEntry> {
    let mut sorted = entries;
    // Primary: win percentage, descending — ranked as supplied, never
    // recomputed from wins/losses. Tie-break: conference wins, descending.
    // Ties beyond that keep input order (stable sort); the source defines
    // no further tie-break.
    sorted.sort_by(|a, b| {
        b.win_pct.total_cmp(&a.win_pct).then_with(|| {
            record_wins(&b.conference_record).cmp(&record_wins(&a.conference_record))
        })
    });

    // Scope leader = first entry of each partition in sorted order.
    let mut leaders: HashMap<String, (i64, u32, u32)> = HashMap::new();
    for e in &sorted {
        leaders
            .entry(scope.partition(e).to_owned())
            .or_insert((e.team_id, e.wins, e.losses));
    }

    let mut next_rank: HashMap<String, u32> = HashMap::new();
    sorted
        .into_iter()
        .map(|team| {
            let key = scope.partition(&team).to_owned();
            let rank = {
                let r = next_rank.entry(key.clone()).or_insert(0);
                *r += 1;
                *r
            };
            let games_back = match leaders.get(&key) {
                Some(&(leader_id, lw, ll)) if team.team_id != leader_id => {
                    games_back(lw, ll, team.wins, team.losses)
                }
                _ => 0.0,
            };
            RankedStandingsEntry { rank, games_back, team }
        })
        .collect()
}

/// Half the sum of the win gap and the loss gap. The value is a
/// half-integer and keeps its fractional precision; formatting belongs to
/// the presentation boundary.
pub fn games_back(leader_wins: u32, leader_losses: u32, wins: u32, losses: u32) -> f64 {
    ((f64::from(leader_wins) - f64::from(wins)) + (f64::from(losses) - f64::from(leader_losses)))
        / 2.0
}

/// Wins prefix of a "W-L" record string; malformed records count as zero.
fn record_wins(record: &str) -> u32 {
    let prefix = record.split('-').next().unwrap_or_default().trim();
    prefix.parse().unwrap_or_else(|_| {
        if !record.is_empty() {
            warn!("unparseable record string {record:?}, treating as 0 wins");
        }
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        team_id: i64,
        conference: &str,
        division: &str,
        wins: u32,
        losses: u32,
        conference_record: &str,
    ) -> StandingsEntry {
        StandingsEntry {
            team_id,
            conference: conference.to_owned(),
            division: division.to_owned(),
            wins,
            losses,
            win_pct: f64::from(wins) / f64::from(wins + losses),
            conference_record: conference_record.to_owned(),
            ..StandingsEntry::default()
        }
    }

    #[test]
    fn win_percentage_orders_the_table() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 40, 20, "25-10"),
                entry(2, "East", "Central", 50, 10, "30-5"),
            ],
            StandingsScope::League,
        );
        assert_eq!(ranked[0].team.team_id, 2);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn conference_wins_break_win_percentage_ties() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 50, 10, "28-7"),
                entry(2, "East", "Central", 50, 10, "30-5"),
            ],
            StandingsScope::League,
        );
        assert_eq!(ranked[0].team.team_id, 2, "30 conference wins outrank 28");
    }

    #[test]
    fn full_ties_keep_input_order() {
        let ranked = rank_standings(
            vec![
                entry(7, "East", "Atlantic", 50, 10, "30-5"),
                entry(8, "West", "Pacific", 50, 10, "30-5"),
            ],
            StandingsScope::League,
        );
        assert_eq!(ranked[0].team.team_id, 7);
        assert_eq!(ranked[1].team.team_id, 8);
    }

    #[test]
    fn malformed_record_strings_count_as_zero_wins() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 50, 10, "garbage"),
                entry(2, "East", "Central", 50, 10, "1-34"),
            ],
            StandingsScope::League,
        );
        assert_eq!(ranked[0].team.team_id, 2);
    }

    #[test]
    fn league_games_back_measures_against_the_global_leader() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 50, 10, "30-5"),
                entry(2, "West", "Pacific", 46, 14, "28-7"),
                entry(3, "East", "Central", 49, 10, "27-8"),
            ],
            StandingsScope::League,
        );
        assert_eq!(ranked[0].games_back, 0.0, "leader is always at 0");
        assert_eq!(ranked[1].team.team_id, 3);
        assert_eq!(ranked[1].games_back, 0.5, "half-integer precision retained");
        assert_eq!(ranked[2].games_back, 4.0);
    }

    #[test]
    fn games_back_never_decreases_down_the_table() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "A", 50, 10, "30-5"),
                entry(2, "East", "B", 48, 12, "28-7"),
                entry(3, "West", "C", 44, 16, "26-9"),
                entry(4, "West", "D", 30, 30, "15-20"),
            ],
            StandingsScope::League,
        );
        for pair in ranked.windows(2) {
            assert!(pair[1].games_back >= pair[0].games_back);
        }
    }

    #[test]
    fn conference_view_scopes_rank_and_games_back_per_conference() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 50, 10, "30-5"),
                entry(2, "West", "Pacific", 48, 12, "29-6"),
                entry(3, "East", "Central", 45, 15, "25-10"),
                entry(4, "West", "Northwest", 40, 20, "20-15"),
            ],
            StandingsScope::Conference,
        );
        let west: Vec<&RankedStandingsEntry> =
            ranked.iter().filter(|r| r.team.conference == "West").collect();
        assert_eq!(west[0].team.team_id, 2);
        assert_eq!(west[0].rank, 1);
        assert_eq!(west[0].games_back, 0.0, "each conference has its own leader");
        assert_eq!(west[1].rank, 2);
        assert_eq!(west[1].games_back, 8.0);

        let east: Vec<&RankedStandingsEntry> =
            ranked.iter().filter(|r| r.team.conference == "East").collect();
        assert_eq!(east[0].rank, 1);
        assert_eq!(east[1].rank, 2);
        assert_eq!(east[1].games_back, 5.0);
    }

    #[test]
    fn division_view_scopes_to_divisions() {
        let ranked = rank_standings(
            vec![
                entry(1, "East", "Atlantic", 50, 10, "30-5"),
                entry(2, "East", "Atlantic", 47, 13, "28-7"),
                entry(3, "East", "Central", 30, 30, "14-21"),
            ],
            StandingsScope::Division,
        );
        let central = ranked.iter().find(|r| r.team.division == "Central").unwrap();
        assert_eq!(central.rank, 1, "sole division team leads its partition");
        assert_eq!(central.games_back, 0.0);

        let atlantic_second = ranked.iter().find(|r| r.team.team_id == 2).unwrap();
        assert_eq!(atlantic_second.rank, 2);
        assert_eq!(atlantic_second.games_back, 3.0);
    }

    #[test]
    fn empty_standings_rank_to_nothing() {
        assert!(rank_standings(Vec::new(), StandingsScope::League).is_empty());
    }
}
