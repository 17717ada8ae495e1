//! Battle outcomes and Monte-Carlo aggregates.

use serde::Serialize;

/// Outcome of a single battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub left_wins: bool,
    /// The battle hit the tick ceiling and was scored against the left team.
    pub timeout: bool,
    pub ticks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

/// Summary statistics over many battles of the same matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupStats {
    pub runs: usize,
    pub left_wins: usize,
    pub timeouts: usize,
    pub left_win_rate: f64,
    pub timeout_rate: f64,
    pub avg_ticks: f64,
    pub min_ticks: u64,
    pub max_ticks: u64,
}

impl MatchupStats {
    pub fn from_results(results: &[BattleReport]) -> Self {
        let runs = results.len();
        let left_wins = results.iter().filter(|r| r.left_wins).count();
        let timeouts = results.iter().filter(|r| r.timeout).count();
        let total_ticks: u64 = results.iter().map(|r| r.ticks).sum();
        let denom = runs.max(1) as f64;
        Self {
            runs,
            left_wins,
            timeouts,
            left_win_rate: left_wins as f64 / denom,
            timeout_rate: timeouts as f64 / denom,
            avg_ticks: total_ticks as f64 / denom,
            min_ticks: results.iter().map(|r| r.ticks).min().unwrap_or(0),
            max_ticks: results.iter().map(|r| r.ticks).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(left_wins: bool, timeout: bool, ticks: u64) -> BattleReport {
        BattleReport { left_wins, timeout, ticks, trace: None }
    }

    #[test]
    fn aggregates_win_rate_and_ticks() {
        let results = vec![
            report(true, false, 100),
            report(false, false, 200),
            report(true, false, 300),
            report(false, true, 10_000),
        ];
        let stats = MatchupStats::from_results(&results);
        assert_eq!(stats.runs, 4);
        assert_eq!(stats.left_wins, 2);
        assert_eq!(stats.timeouts, 1);
        assert!((stats.left_win_rate - 0.5).abs() < 1e-9);
        assert!((stats.timeout_rate - 0.25).abs() < 1e-9);
        assert_eq!(stats.min_ticks, 100);
        assert_eq!(stats.max_ticks, 10_000);
        assert!((stats.avg_ticks - 2650.0).abs() < 1e-9);
    }

    #[test]
    fn empty_results_do_not_divide_by_zero() {
        let stats = MatchupStats::from_results(&[]);
        assert_eq!(stats.runs, 0);
        assert_eq!(stats.left_win_rate, 0.0);
        assert_eq!(stats.avg_ticks, 0.0);
    }
}
