// Plate-appearance classification.
//
// Statcast search rows are one per pitch; only the final pitch of a plate
// appearance carries an `events` label. Classification keeps those rows,
// resolves which side the batter played for, and derives hit flags.

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One Statcast search row, as fetched. Every column is optional; numeric
/// columns that fail to parse come through as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPlateAppearance {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub game_date: Option<NaiveDate>,
    #[serde(default)]
    pub events: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inning_topbot: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    /// Kept as text; coerced during classification.
    #[serde(default)]
    pub rbi: Option<String>,
    #[serde(default)]
    pub pitch_name: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub launch_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub launch_angle: Option<f64>,
    #[serde(default, alias = "hit_distance_sc", deserialize_with = "csv::invalid_option")]
    pub hit_distance: Option<f64>,
}

// ---------------------------------------------------------------------------
// Outcome and flags
// ---------------------------------------------------------------------------

/// The recorded result of a plate appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Single,
    Double,
    Triple,
    HomeRun,
    /// Any other label (strikeout, walk, field_out, ...), kept verbatim.
    Other(String),
}

impl Outcome {
    /// Exact, case-sensitive match against the Statcast event labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "single" => Outcome::Single,
            "double" => Outcome::Double,
            "triple" => Outcome::Triple,
            "home_run" => Outcome::HomeRun,
            other => Outcome::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Outcome::Single => "single",
            Outcome::Double => "double",
            Outcome::Triple => "triple",
            Outcome::HomeRun => "home_run",
            Outcome::Other(s) => s,
        }
    }
}

/// Mutually exclusive 0/1 hit flags for one plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitFlags {
    pub single: u32,
    pub double: u32,
    pub triple: u32,
    pub home_run: u32,
}

impl HitFlags {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let mut flags = HitFlags::default();
        match outcome {
            Outcome::Single => flags.single = 1,
            Outcome::Double => flags.double = 1,
            Outcome::Triple => flags.triple = 1,
            Outcome::HomeRun => flags.home_run = 1,
            Outcome::Other(_) => {}
        }
        flags
    }

    pub fn total_bases(&self) -> u32 {
        self.single + 2 * self.double + 3 * self.triple + 4 * self.home_run
    }

    pub fn hits(&self) -> u32 {
        self.single + self.double + self.triple + self.home_run
    }
}

/// Which half of the inning the batter's team hit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfInning {
    Top,
    Bottom,
}

impl HalfInning {
    /// "Top" means the batter is on the away team; anything else is treated
    /// as the bottom half.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Top") => HalfInning::Top,
            _ => HalfInning::Bottom,
        }
    }
}

// ---------------------------------------------------------------------------
// Classified event
// ---------------------------------------------------------------------------

/// A completed plate appearance with derived hitting stats.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub game_date: Option<NaiveDate>,
    pub player_team: String,
    pub opponent: String,
    pub outcome: Outcome,
    pub flags: HitFlags,
    pub rbi: u32,
    pub description: Option<String>,
    pub pitch_name: Option<String>,
    pub launch_speed: Option<f64>,
    pub launch_angle: Option<f64>,
    pub hit_distance: Option<f64>,
}

impl ClassifiedEvent {
    pub fn total_bases(&self) -> u32 {
        self.flags.total_bases()
    }

    pub fn hits(&self) -> u32 {
        self.flags.hits()
    }
}

/// Coerce a raw RBI value to a count. Absent, blank, non-numeric, negative
/// or non-finite values become 0; fractional values truncate.
pub fn parse_rbi(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u32)
        .unwrap_or(0)
}

/// Classify a single row, or `None` when it has no outcome label.
pub fn classify_one(raw: &RawPlateAppearance) -> Option<ClassifiedEvent> {
    let label = raw.events.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let outcome = Outcome::from_label(label);

    let home = raw.home_team.clone().unwrap_or_default();
    let away = raw.away_team.clone().unwrap_or_default();
    let (player_team, opponent) = match HalfInning::from_label(raw.inning_topbot.as_deref()) {
        HalfInning::Top => (away, home),
        HalfInning::Bottom => (home, away),
    };

    Some(ClassifiedEvent {
        game_date: raw.game_date,
        player_team,
        opponent,
        flags: HitFlags::from_outcome(&outcome),
        outcome,
        rbi: parse_rbi(raw.rbi.as_deref()),
        description: raw.description.clone(),
        pitch_name: raw.pitch_name.clone(),
        launch_speed: raw.launch_speed,
        launch_angle: raw.launch_angle,
        hit_distance: raw.hit_distance,
    })
}

/// Classify every row that carries an outcome, preserving input order.
pub fn classify(records: &[RawPlateAppearance]) -> Vec<ClassifiedEvent> {
    records.iter().filter_map(classify_one).collect()
}

/// Events whose opponent contains `query`, ignoring case. A blank query
/// keeps every event.
pub fn filter_by_opponent(events: &[ClassifiedEvent], query: &str) -> Vec<ClassifiedEvent> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| e.opponent.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The `n` most recent plate appearances, newest first. Events on the same
/// date keep their input order; undated events sort last.
pub fn recent_plate_appearances(events: &[ClassifiedEvent], n: usize) -> Vec<ClassifiedEvent> {
    let mut sorted: Vec<ClassifiedEvent> = events.to_vec();
    sorted.sort_by(|a, b| b.game_date.cmp(&a.game_date));
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
