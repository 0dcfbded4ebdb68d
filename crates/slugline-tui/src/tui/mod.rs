// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the text inputs and the latest views
// pushed by the app orchestrator. `UiUpdate` messages are applied to it and
// the frame is re-rendered at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use slugline_baseball::stats::category::Category;
use slugline_baseball::stats::season::SeasonBatting;

use crate::protocol::{StatusKind, UiUpdate, UserCommand};
use crate::session::{AnalysisView, PlayerCard, SeasonSummary};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// Editable text fields in the input bar, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Player,
    Opponent,
    Thresholds,
}

impl InputField {
    pub const ALL: [InputField; 3] = [InputField::Player, InputField::Opponent, InputField::Thresholds];

    pub fn label(&self) -> &'static str {
        match self {
            InputField::Player => "Player",
            InputField::Opponent => "Opponent",
            InputField::Thresholds => "Thresholds",
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: text inputs plus the latest views from the app.
pub struct ViewState {
    /// Field receiving keystrokes; `None` means dashboard shortcuts are live.
    pub focus: Option<InputField>,
    pub player_input: String,
    pub opponent_input: String,
    pub thresholds_input: String,
    pub category: Category,
    pub player: Option<PlayerCard>,
    pub analysis: Option<AnalysisView>,
    pub season: Option<SeasonSummary>,
    pub career: Option<Vec<SeasonBatting>>,
    pub status: String,
    pub status_kind: StatusKind,
    /// Date used for the age shown in the bio panel.
    pub today: NaiveDate,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            focus: Some(InputField::Player),
            player_input: String::new(),
            opponent_input: String::new(),
            thresholds_input: "1,2".to_string(),
            category: Category::Singles,
            player: None,
            analysis: None,
            season: None,
            career: None,
            status: "Enter a player name (e.g. Shohei Ohtani)".to_string(),
            status_kind: StatusKind::Info,
            today: chrono::Local::now().date_naive(),
        }
    }
}

impl ViewState {
    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::Player => &self.player_input,
            InputField::Opponent => &self.opponent_input,
            InputField::Thresholds => &self.thresholds_input,
        }
    }

    pub fn input_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Player => &mut self.player_input,
            InputField::Opponent => &mut self.opponent_input,
            InputField::Thresholds => &mut self.thresholds_input,
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: String) {
        self.status_kind = kind;
        self.status = message;
    }

    /// Drop every view derived from a loaded player.
    fn clear_player_views(&mut self) {
        self.player = None;
        self.analysis = None;
        self.season = None;
        self.career = None;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Ready {
            category,
            thresholds,
        } => {
            state.category = category;
            state.thresholds_input = thresholds
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
        }
        UiUpdate::Busy(message) => state.set_status(StatusKind::Busy, message),
        UiUpdate::PlayerLoaded(card) => {
            state.clear_player_views();
            state.player = Some(*card);
        }
        UiUpdate::Analysis(view) => {
            state.category = view.category;
            state.analysis = Some(*view);
        }
        UiUpdate::Season(summary) => {
            state.season = Some(*summary);
        }
        UiUpdate::Career(lines) => {
            state.career = Some(lines);
        }
        UiUpdate::Notice(message) => state.set_status(StatusKind::Info, message),
        UiUpdate::NoData(message) => {
            state.clear_player_views();
            state.set_status(StatusKind::Info, message);
        }
        UiUpdate::Error(message) => state.set_status(StatusKind::Error, message),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::input_bar::render(frame, layout.input_bar, state);
    widgets::category::render(frame, layout.category, state);
    widgets::bio::render(frame, layout.bio, state);
    widgets::season::render(frame, layout.season, state);
    widgets::trend_chart::render(frame, layout.trend_chart, state);
    widgets::hit_rates::render(frame, layout.hit_rates, state);
    widgets::prediction::render(frame, layout.prediction, state);
    widgets::at_bats::render(frame, layout.at_bats, state);
    widgets::status_bar::render_help(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, and
/// runs an async select loop over UI updates, keyboard input and render
/// ticks until the user quits or the app hangs up.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.focus, Some(InputField::Player));
        assert!(state.player_input.is_empty());
        assert!(state.analysis.is_none());
        assert!(state.player.is_none());
        assert_eq!(state.status_kind, StatusKind::Info);
    }

    #[test]
    fn ready_sets_defaults() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Ready {
                category: Category::TotalBases,
                thresholds: vec![2, 4],
            },
        );
        assert_eq!(state.category, Category::TotalBases);
        assert_eq!(state.thresholds_input, "2,4");
    }

    #[test]
    fn player_loaded_resets_previous_views() {
        let mut state = populated_state();
        state.career = Some(Vec::new());
        apply_ui_update(&mut state, UiUpdate::PlayerLoaded(Box::new(player_card())));
        assert!(state.player.is_some());
        assert!(state.analysis.is_none());
        assert!(state.career.is_none());
    }

    #[test]
    fn analysis_update_syncs_category() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Analysis(Box::new(analysis())));
        assert_eq!(state.category, Category::HomeRuns);
        assert!(state.analysis.is_some());
    }

    #[test]
    fn no_data_clears_views() {
        let mut state = populated_state();
        apply_ui_update(&mut state, UiUpdate::NoData("No player found".to_string()));
        assert!(state.player.is_none());
        assert!(state.analysis.is_none());
        assert_eq!(state.status, "No player found");
    }

    #[test]
    fn error_keeps_views_and_flags_status() {
        let mut state = populated_state();
        apply_ui_update(&mut state, UiUpdate::Error("Error: timeout".to_string()));
        assert!(state.analysis.is_some());
        assert_eq!(state.status_kind, StatusKind::Error);
    }

    #[test]
    fn busy_then_notice() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Busy("Loading...".to_string()));
        assert_eq!(state.status_kind, StatusKind::Busy);
        apply_ui_update(&mut state, UiUpdate::Notice("Done".to_string()));
        assert_eq!(state.status_kind, StatusKind::Info);
        assert_eq!(state.status, "Done");
    }

    #[test]
    fn render_frame_empty_state() {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        let state = ViewState::default();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }

    #[test]
    fn render_frame_populated_state() {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        let state = populated_state();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }

    #[test]
    fn render_frame_small_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let state = populated_state();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
