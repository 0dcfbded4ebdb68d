// Messages exchanged between the TUI and the app orchestrator.

use slugline_baseball::stats::category::Category;
use slugline_baseball::stats::season::SeasonBatting;

use crate::session::{AnalysisView, PlayerCard, SeasonSummary};

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    LoadPlayer(String),
    SetOpponent(String),
    SetThresholds(String),
    SetCategory(Category),
    LoadSeason,
    LoadCareer,
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Initial inputs taken from config.
    Ready {
        category: Category,
        thresholds: Vec<u32>,
    },
    /// A request is in flight.
    Busy(String),
    PlayerLoaded(Box<PlayerCard>),
    Analysis(Box<AnalysisView>),
    Season(Box<SeasonSummary>),
    Career(Vec<SeasonBatting>),
    /// Informational message; clears nothing.
    Notice(String),
    /// Lookup found nothing; every player-derived view is cleared.
    NoData(String),
    Error(String),
}

/// Severity of the status-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Busy,
    Error,
}
