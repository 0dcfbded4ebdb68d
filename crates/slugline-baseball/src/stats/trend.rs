// Hit-rate trends: how often a category met a threshold over the last
// 10, 5 and 3 games.

use serde::Serialize;
use slugline_core::config::DenominatorPolicy;

use crate::stats::category::Category;
use crate::stats::games::GameStatLine;

/// Trailing window sizes, largest first.
pub const TREND_WINDOWS: [usize; 3] = [10, 5, 3];

/// Hit count over one trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowRate {
    /// Nominal window size.
    pub window: usize,
    /// Games in the window that met the threshold.
    pub hits: usize,
    /// Divisor used for `percent`.
    pub denominator: usize,
    /// `hits / denominator` as a whole-number percentage.
    pub percent: u32,
}

impl WindowRate {
    fn compute(flags: &[bool], window: usize, policy: DenominatorPolicy) -> Self {
        let start = flags.len().saturating_sub(window);
        let slice = &flags[start..];
        let hits = slice.iter().filter(|&&hit| hit).count();
        let denominator = match policy {
            DenominatorPolicy::Nominal => window,
            DenominatorPolicy::Available => slice.len(),
        };
        let percent = if denominator == 0 {
            0
        } else {
            (hits as f64 / denominator as f64 * 100.0).round() as u32
        };
        WindowRate {
            window,
            hits,
            denominator,
            percent,
        }
    }

    /// "<hits>/<denominator> (<percent>%)".
    pub fn summary(&self) -> String {
        format!("{}/{} ({}%)", self.hits, self.denominator, self.percent)
    }
}

/// Hit rates for one threshold of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendResult {
    pub category: Category,
    pub threshold: u32,
    /// One entry per `TREND_WINDOWS` size, in the same order.
    pub windows: Vec<WindowRate>,
}

impl TrendResult {
    pub fn window(&self, size: usize) -> Option<&WindowRate> {
        self.windows.iter().find(|w| w.window == size)
    }

    /// Row label, e.g. "HR ≥ 1".
    pub fn label(&self) -> String {
        format!("{} ≥ {}", self.category.label(), self.threshold)
    }
}

/// Whether each game met `threshold` for `category`, oldest first.
pub fn hit_flags(games: &[GameStatLine], category: Category, threshold: u32) -> Vec<bool> {
    games
        .iter()
        .map(|g| category.game_value(g) >= threshold)
        .collect()
}

/// One `TrendResult` per threshold over chronologically ordered `games`.
///
/// Windows are taken from the tail. With `DenominatorPolicy::Nominal` a
/// short sample is still divided by the full window size.
pub fn hit_rates(
    games: &[GameStatLine],
    category: Category,
    thresholds: &[u32],
    policy: DenominatorPolicy,
) -> Vec<TrendResult> {
    thresholds
        .iter()
        .map(|&threshold| {
            let flags = hit_flags(games, category, threshold);
            TrendResult {
                category,
                threshold,
                windows: TREND_WINDOWS
                    .iter()
                    .map(|&w| WindowRate::compute(&flags, w, policy))
                    .collect(),
            }
        })
        .collect()
}

/// Parse comma-separated thresholds, keeping only all-digit items.
///
/// `"1, 2,x,,3"` gives `[1, 2, 3]`. Items too large for `u32` are dropped.
pub fn parse_thresholds(text: &str) -> Vec<u32> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|s| s.parse().ok())
        .collect()
}
