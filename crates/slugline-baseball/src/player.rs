// Player identity and biographical details.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// MLBAM person id, shared by the Statcast search and the Stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player matched by name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerMatch {
    pub id: PlayerId,
    pub full_name: String,
}

/// Biographical details for the bio panel. Optional fields render as "N/A".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlayerBio {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<String>,
    pub weight: Option<u32>,
    pub position: Option<String>,
    pub debut: Option<NaiveDate>,
    pub team: Option<String>,
    pub bat_side: Option<String>,
    pub pitch_hand: Option<String>,
}

const NOT_AVAILABLE: &str = "N/A";

impl PlayerBio {
    /// Age as the difference of calendar years, matching how the dashboard
    /// has always shown it.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date.map(|b| today.year() - b.year())
    }

    /// "Bats/Throws", e.g. "Left/Right". Missing halves are left blank.
    pub fn bat_throw(&self) -> String {
        format!(
            "{}/{}",
            self.bat_side.as_deref().unwrap_or(""),
            self.pitch_hand.as_deref().unwrap_or("")
        )
    }

    /// Attribute/value rows in display order.
    pub fn attribute_rows(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        fn or_na(value: Option<String>) -> String {
            value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }

        vec![
            ("Full Name", self.full_name.clone()),
            (
                "Birthday",
                or_na(self.birth_date.map(|d| d.format("%B %d, %Y").to_string())),
            ),
            ("Age", or_na(self.age_on(today).map(|a| a.to_string()))),
            ("Height", or_na(self.height.clone())),
            ("Weight", or_na(self.weight.map(|w| w.to_string()))),
            ("Position", or_na(self.position.clone())),
            (
                "Debut",
                or_na(self.debut.map(|d| d.format("%Y-%m-%d").to_string())),
            ),
            ("Team", or_na(self.team.clone())),
            ("Bat/Throw", self.bat_throw()),
        ]
    }
}
