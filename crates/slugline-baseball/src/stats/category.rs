// Statistical categories that can be charted, trended, and predicted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::events::ClassifiedEvent;
use crate::stats::games::GameStatLine;

/// A counting category derived from plate-appearance outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Singles,
    Doubles,
    Triples,
    HomeRuns,
    TotalBases,
    Hits,
}

impl Category {
    /// Every category, in selector order.
    pub const ALL: [Category; 6] = [
        Category::Singles,
        Category::Doubles,
        Category::Triples,
        Category::HomeRuns,
        Category::TotalBases,
        Category::Hits,
    ];

    /// Parse a short label ("1B", "HR", ...). Case-insensitive.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "1B" => Some(Category::Singles),
            "2B" => Some(Category::Doubles),
            "3B" => Some(Category::Triples),
            "HR" => Some(Category::HomeRuns),
            "TB" => Some(Category::TotalBases),
            "H" => Some(Category::Hits),
            _ => None,
        }
    }

    /// Short column label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Singles => "1B",
            Category::Doubles => "2B",
            Category::Triples => "3B",
            Category::HomeRuns => "HR",
            Category::TotalBases => "TB",
            Category::Hits => "H",
        }
    }

    /// Human-readable name for selectors and axis titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Singles => "Singles",
            Category::Doubles => "Doubles",
            Category::Triples => "Triples",
            Category::HomeRuns => "Home Runs",
            Category::TotalBases => "Total Bases",
            Category::Hits => "Hits",
        }
    }

    /// Whether a per-game average of this category reads as a probability
    /// (at most one per plate appearance) rather than an expected count.
    pub fn is_rate_like(&self) -> bool {
        !matches!(self, Category::TotalBases | Category::Hits)
    }

    /// The next category in selector order, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous category in selector order, wrapping around.
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// This category's value for a single classified plate appearance.
    pub fn event_value(&self, event: &ClassifiedEvent) -> u32 {
        let flags = &event.flags;
        match self {
            Category::Singles => flags.single,
            Category::Doubles => flags.double,
            Category::Triples => flags.triple,
            Category::HomeRuns => flags.home_run,
            Category::TotalBases => flags.total_bases(),
            Category::Hits => flags.hits(),
        }
    }

    /// This category's value for an aggregated game line.
    pub fn game_value(&self, game: &GameStatLine) -> u32 {
        match self {
            Category::Singles => game.singles,
            Category::Doubles => game.doubles,
            Category::Triples => game.triples,
            Category::HomeRuns => game.home_runs,
            Category::TotalBases => game.total_bases,
            Category::Hits => game.hits,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parser() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
        }
    }

    #[test]
    fn parser_is_case_insensitive_and_trims() {
        assert_eq!(Category::from_label(" hr "), Some(Category::HomeRuns));
        assert_eq!(Category::from_label("tb"), Some(Category::TotalBases));
        assert_eq!(Category::from_label("SB"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn labels_match_config_labels() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, slugline_core::config::CATEGORY_LABELS);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(Category::Hits.next(), Category::Singles);
        assert_eq!(Category::Singles.prev(), Category::Hits);
        assert_eq!(Category::Doubles.next().prev(), Category::Doubles);
    }

    #[test]
    fn display_names() {
        assert_eq!(Category::HomeRuns.display_name(), "Home Runs");
        assert_eq!(Category::TotalBases.to_string(), "TB");
    }

    #[test]
    fn rate_like_excludes_total_bases() {
        assert!(Category::HomeRuns.is_rate_like());
        assert!(!Category::TotalBases.is_rate_like());
    }
}
