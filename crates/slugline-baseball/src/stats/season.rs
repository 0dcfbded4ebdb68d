// Season and career batting lines, and per-game averages.

use serde::Serialize;

use crate::stats::round2;

/// One season's batting totals for a single team stint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonBatting {
    pub season: i32,
    pub team: String,
    pub games: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub stolen_bases: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub ops: Option<f64>,
}

/// Per-game rates derived from a season line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerGameAverages {
    pub home_runs: f64,
    pub rbi: f64,
    pub walks: f64,
    pub strikeouts: f64,
    pub ops: Option<f64>,
}

impl PerGameAverages {
    /// Labelled values in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("HR/Game", format!("{:.2}", self.home_runs)),
            ("RBI/Game", format!("{:.2}", self.rbi)),
            ("BB/Game", format!("{:.2}", self.walks)),
            ("K/Game", format!("{:.2}", self.strikeouts)),
            (
                "OPS",
                self.ops.map_or_else(|| "N/A".to_string(), |v| format!("{v:.3}")),
            ),
        ]
    }
}

/// Per-game averages rounded to two decimals. A zero games count divides
/// by one instead.
pub fn per_game_averages(line: &SeasonBatting) -> PerGameAverages {
    let games = line.games.max(1) as f64;
    PerGameAverages {
        home_runs: round2(line.home_runs as f64 / games),
        rbi: round2(line.rbi as f64 / games),
        walks: round2(line.walks as f64 / games),
        strikeouts: round2(line.strikeouts as f64 / games),
        ops: line.ops.map(|v| (v * 1000.0).round() / 1000.0),
    }
}

/// Career lines from `start_year` onward, oldest season first. Rows within
/// a season keep their reported order.
pub fn career_from(lines: &[SeasonBatting], start_year: i32) -> Vec<SeasonBatting> {
    let mut career: Vec<SeasonBatting> = lines
        .iter()
        .filter(|l| l.season >= start_year)
        .cloned()
        .collect();
    career.sort_by_key(|l| l.season);
    career
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(season: i32, team: &str, games: u32) -> SeasonBatting {
        SeasonBatting {
            season,
            team: team.to_string(),
            games,
            at_bats: 500,
            hits: 150,
            home_runs: 30,
            rbi: 90,
            stolen_bases: 10,
            walks: 60,
            strikeouts: 120,
            ops: Some(0.912_4),
        }
    }

    #[test]
    fn averages_divide_by_games() {
        let avg = per_game_averages(&line(2025, "LAD", 150));
        assert_eq!(avg.home_runs, 0.2);
        assert_eq!(avg.rbi, 0.6);
        assert_eq!(avg.walks, 0.4);
        assert_eq!(avg.strikeouts, 0.8);
        assert_eq!(avg.ops, Some(0.912));
    }

    #[test]
    fn zero_games_divides_by_one() {
        let mut l = line(2025, "LAD", 0);
        l.home_runs = 3;
        let avg = per_game_averages(&l);
        assert_eq!(avg.home_runs, 3.0);
    }

    #[test]
    fn rows_format_missing_ops() {
        let mut l = line(2025, "LAD", 150);
        l.ops = None;
        let rows = per_game_averages(&l).rows();
        assert_eq!(rows[0], ("HR/Game", "0.20".to_string()));
        assert_eq!(rows[4], ("OPS", "N/A".to_string()));
    }

    #[test]
    fn career_filters_and_sorts() {
        let lines = vec![
            line(2021, "LAD", 100),
            line(2013, "LAA", 80),
            line(2018, "LAA", 104),
            line(2018, "NYY", 20),
        ];
        let career = career_from(&lines, 2015);
        let seasons: Vec<(i32, &str)> = career.iter().map(|l| (l.season, l.team.as_str())).collect();
        assert_eq!(seasons, vec![(2018, "LAA"), (2018, "NYY"), (2021, "LAD")]);
        assert!(career_from(&[], 2015).is_empty());
    }
}
