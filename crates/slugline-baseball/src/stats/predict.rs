// Next-game prediction: a fixed linear blend of three per-game averages.

use serde::Serialize;
use slugline_core::config::{MissingAverage, PredictionWeights};

use crate::stats::category::Category;
use crate::stats::events::ClassifiedEvent;
use crate::stats::games::{daily_totals, GameStatLine};
use crate::stats::{mean, round2};

/// Categories included in the predicted stat line.
pub const PREDICTED_CATEGORIES: [Category; 5] = [
    Category::Singles,
    Category::Doubles,
    Category::Triples,
    Category::HomeRuns,
    Category::TotalBases,
];

/// The three averages feeding one prediction. `None` means no games
/// supported that average.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BlendInputs {
    pub season: Option<f64>,
    pub vs_opponent: Option<f64>,
    pub recent: Option<f64>,
}

/// Blend the three averages and round to two decimals. No clamping is
/// applied, so count-like categories can exceed 1.0.
pub fn blend(inputs: BlendInputs, weights: &PredictionWeights, missing: MissingAverage) -> f64 {
    let terms = [
        (inputs.season, weights.season),
        (inputs.vs_opponent, weights.opponent),
        (inputs.recent, weights.recent),
    ];
    let raw = match missing {
        MissingAverage::Zero => terms
            .iter()
            .map(|(avg, w)| avg.unwrap_or(0.0) * w)
            .sum::<f64>(),
        MissingAverage::Renormalize => {
            let defined_weight: f64 = terms
                .iter()
                .filter(|(avg, _)| avg.is_some())
                .map(|(_, w)| w)
                .sum();
            if defined_weight <= 0.0 {
                0.0
            } else {
                terms
                    .iter()
                    .filter_map(|(avg, w)| avg.map(|a| a * w))
                    .sum::<f64>()
                    / defined_weight
            }
        }
    };
    round2(raw)
}

/// `round(0.4·season + 0.3·vs_opponent + 0.3·recent, 2)`, with undefined
/// averages counted as zero.
pub fn predict_next_game(season: Option<f64>, vs_opponent: Option<f64>, recent: Option<f64>) -> f64 {
    blend(
        BlendInputs {
            season,
            vs_opponent,
            recent,
        },
        &PredictionWeights::default(),
        MissingAverage::Zero,
    )
}

/// Expected value for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictedStat {
    pub category: Category,
    pub inputs: BlendInputs,
    pub expected: f64,
}

impl PredictedStat {
    /// Expected value as a whole-number percentage, for rate-like
    /// categories. Total bases reads as a raw count instead.
    pub fn chance_percent(&self) -> Option<i64> {
        self.category
            .is_rate_like()
            .then(|| (self.expected * 100.0).round() as i64)
    }
}

/// Predicted values for every category in `PREDICTED_CATEGORIES`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedStatLine {
    pub stats: Vec<PredictedStat>,
}

impl PredictedStatLine {
    pub fn get(&self, category: Category) -> Option<&PredictedStat> {
        self.stats.iter().find(|s| s.category == category)
    }

    pub fn expected(&self, category: Category) -> Option<f64> {
        self.get(category).map(|s| s.expected)
    }
}

/// Build the predicted stat line.
///
/// - season average: mean per-date total over `all_events`
/// - opponent average: mean per-date total over `opponent_events`
/// - recent average: mean over `recent_games`
pub fn predict_stat_line(
    all_events: &[ClassifiedEvent],
    opponent_events: &[ClassifiedEvent],
    recent_games: &[GameStatLine],
    weights: &PredictionWeights,
    missing: MissingAverage,
) -> PredictedStatLine {
    let stats = PREDICTED_CATEGORIES
        .iter()
        .map(|&category| {
            let inputs = BlendInputs {
                season: daily_mean(all_events, category),
                vs_opponent: daily_mean(opponent_events, category),
                recent: mean(recent_games.iter().map(|g| category.game_value(g) as f64)),
            };
            PredictedStat {
                category,
                inputs,
                expected: blend(inputs, weights, missing),
            }
        })
        .collect();
    PredictedStatLine { stats }
}

fn daily_mean(events: &[ClassifiedEvent], category: Category) -> Option<f64> {
    mean(
        daily_totals(events, category)
            .into_iter()
            .map(|(_, total)| total as f64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::events::{classify, RawPlateAppearance};
    use crate::stats::games::aggregate;
    use chrono::NaiveDate;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fixed_blend_example() {
        let p = predict_next_game(Some(0.30), Some(0.50), Some(0.20));
        assert!(close(p, 0.33), "got {p}");
    }

    #[test]
    fn missing_average_counts_as_zero() {
        let p = predict_next_game(Some(0.30), None, Some(0.20));
        // 0.12 + 0 + 0.06
        assert!(close(p, 0.18), "got {p}");
        assert!(close(predict_next_game(None, None, None), 0.0));
    }

    #[test]
    fn renormalize_drops_missing_weight() {
        let inputs = BlendInputs {
            season: Some(0.30),
            vs_opponent: None,
            recent: Some(0.20),
        };
        let p = blend(inputs, &PredictionWeights::default(), MissingAverage::Renormalize);
        // (0.12 + 0.06) / 0.7
        assert!(close(p, 0.26), "got {p}");

        let none = blend(
            BlendInputs::default(),
            &PredictionWeights::default(),
            MissingAverage::Renormalize,
        );
        assert!(close(none, 0.0));
    }

    #[test]
    fn renormalize_matches_zero_fill_when_all_defined() {
        let inputs = BlendInputs {
            season: Some(1.2),
            vs_opponent: Some(0.8),
            recent: Some(2.0),
        };
        let w = PredictionWeights::default();
        assert!(close(
            blend(inputs, &w, MissingAverage::Zero),
            blend(inputs, &w, MissingAverage::Renormalize)
        ));
    }

    #[test]
    fn no_clamping_above_one() {
        let p = predict_next_game(Some(2.0), Some(3.0), Some(1.0));
        // 0.8 + 0.9 + 0.3
        assert!(close(p, 2.0), "got {p}");
    }

    fn pa(day: u32, home: &str, event: &str) -> RawPlateAppearance {
        RawPlateAppearance {
            game_date: NaiveDate::from_ymd_opt(2025, 6, day),
            events: Some(event.to_string()),
            inning_topbot: Some("Top".to_string()),
            home_team: Some(home.to_string()),
            away_team: Some("LAD".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn stat_line_from_events() {
        let all = classify(&[
            pa(1, "SF", "single"),
            pa(1, "SF", "home_run"),
            pa(2, "SD", "strikeout"),
            pa(3, "SF", "double"),
        ]);
        let vs_sf: Vec<ClassifiedEvent> = all.iter().filter(|e| e.opponent == "SF").cloned().collect();
        let recent = aggregate(&vs_sf);

        let line = predict_stat_line(
            &all,
            &vs_sf,
            &recent,
            &PredictionWeights::default(),
            MissingAverage::Zero,
        );
        assert_eq!(line.stats.len(), PREDICTED_CATEGORIES.len());

        // Singles: season 1/3, vs SF 1/2, recent 1/2.
        let singles = line.get(Category::Singles).unwrap();
        assert!(close(singles.inputs.season.unwrap(), 1.0 / 3.0));
        assert!(close(singles.inputs.vs_opponent.unwrap(), 0.5));
        assert!(close(singles.expected, 0.43), "got {}", singles.expected);
        assert_eq!(singles.chance_percent(), Some(43));

        // Total bases: season 7/3, vs SF 7/2, recent 7/2.
        let tb = line.get(Category::TotalBases).unwrap();
        let expected: f64 = 0.4 * (7.0 / 3.0) + 0.3 * 3.5 + 0.3 * 3.5;
        assert!(close(tb.expected, (expected * 100.0).round() / 100.0));
        assert_eq!(tb.chance_percent(), None);
    }

    #[test]
    fn empty_opponent_sample_lowers_prediction() {
        let all = classify(&[pa(1, "SF", "single"), pa(2, "SF", "single")]);
        let recent = aggregate(&all);
        let line = predict_stat_line(
            &all,
            &[],
            &recent,
            &PredictionWeights::default(),
            MissingAverage::Zero,
        );
        let singles = line.get(Category::Singles).unwrap();
        assert_eq!(singles.inputs.vs_opponent, None);
        assert!(close(singles.expected, 0.7));
        assert!(close(line.expected(Category::Singles).unwrap(), 0.7));
    }

    #[test]
    fn empty_everything_predicts_zero() {
        let line = predict_stat_line(
            &[],
            &[],
            &[],
            &PredictionWeights::default(),
            MissingAverage::Zero,
        );
        assert!(line.stats.iter().all(|s| close(s.expected, 0.0)));
    }
}
