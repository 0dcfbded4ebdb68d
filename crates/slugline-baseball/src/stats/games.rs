// Per-game aggregation of classified plate appearances.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::stats::category::Category;
use crate::stats::events::ClassifiedEvent;

/// Summed hitting stats for one (date, opponent) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatLine {
    pub game_date: NaiveDate,
    pub opponent: String,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub total_bases: u32,
    pub hits: u32,
    pub rbi: u32,
}

impl GameStatLine {
    fn empty(game_date: NaiveDate, opponent: String) -> Self {
        GameStatLine {
            game_date,
            opponent,
            singles: 0,
            doubles: 0,
            triples: 0,
            home_runs: 0,
            total_bases: 0,
            hits: 0,
            rbi: 0,
        }
    }

    fn add(&mut self, event: &ClassifiedEvent) {
        self.singles += event.flags.single;
        self.doubles += event.flags.double;
        self.triples += event.flags.triple;
        self.home_runs += event.flags.home_run;
        self.total_bases += event.total_bases();
        self.hits += event.hits();
        self.rbi += event.rbi;
    }
}

/// Group events by (date, opponent) and sum each line, oldest first.
///
/// Two games on the same date against the same opponent collapse into one
/// line. Events without a date cannot be placed in a game and are skipped.
pub fn aggregate(events: &[ClassifiedEvent]) -> Vec<GameStatLine> {
    let mut games: BTreeMap<(NaiveDate, String), GameStatLine> = BTreeMap::new();
    for event in events {
        let Some(day) = event.game_date else {
            continue;
        };
        games
            .entry((day, event.opponent.clone()))
            .or_insert_with(|| GameStatLine::empty(day, event.opponent.clone()))
            .add(event);
    }
    games.into_values().collect()
}

/// The `k` most recent game lines, in chronological order.
pub fn last_games(lines: &[GameStatLine], k: usize) -> Vec<GameStatLine> {
    let mut sorted = lines.to_vec();
    sorted.sort_by(|a, b| a.game_date.cmp(&b.game_date));
    let start = sorted.len().saturating_sub(k);
    sorted.split_off(start)
}

/// Per-date totals of `category`, oldest first. Unlike `aggregate`, games on
/// the same date against different opponents are summed together.
pub fn daily_totals(events: &[ClassifiedEvent], category: Category) -> Vec<(NaiveDate, u32)> {
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in events {
        if let Some(day) = event.game_date {
            *days.entry(day).or_insert(0) += category.event_value(event);
        }
    }
    days.into_iter().collect()
}
