// Keyboard input handling and command dispatch.
//
// While an input field has focus, printable keys edit it and Enter submits
// it. With no field focused, single-key shortcuts drive the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{InputField, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator, `None` when it only changed local `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match view_state.focus {
        Some(field) => handle_field_key(key_event, field, view_state),
        None => handle_dashboard_key(key_event, view_state),
    }
}

fn handle_field_key(
    key_event: KeyEvent,
    field: InputField,
    view_state: &mut ViewState,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Tab => {
            view_state.focus = next_focus(Some(field));
            None
        }
        KeyCode::BackTab => {
            view_state.focus = prev_focus(Some(field));
            None
        }
        KeyCode::Esc => {
            view_state.focus = None;
            None
        }
        KeyCode::Enter => {
            view_state.focus = None;
            submit(field, view_state)
        }
        KeyCode::Backspace => {
            view_state.input_mut(field).pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.input_mut(field).push(c);
            None
        }
        _ => None,
    }
}

fn handle_dashboard_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Tab => {
            view_state.focus = next_focus(None);
            None
        }
        KeyCode::BackTab => {
            view_state.focus = prev_focus(None);
            None
        }
        KeyCode::Char('p') => {
            view_state.focus = Some(InputField::Player);
            None
        }
        KeyCode::Char('o') => {
            view_state.focus = Some(InputField::Opponent);
            None
        }
        KeyCode::Char('t') => {
            view_state.focus = Some(InputField::Thresholds);
            None
        }
        KeyCode::Char('c') | KeyCode::Right => {
            view_state.category = view_state.category.next();
            Some(UserCommand::SetCategory(view_state.category))
        }
        KeyCode::Char('C') | KeyCode::Left => {
            view_state.category = view_state.category.prev();
            Some(UserCommand::SetCategory(view_state.category))
        }
        KeyCode::Char('s') => Some(UserCommand::LoadSeason),
        KeyCode::Char('r') => Some(UserCommand::LoadCareer),
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

/// Build the command for submitting `field`. A blank player name is not
/// submitted; blank opponent and threshold fields are, to clear them.
fn submit(field: InputField, view_state: &ViewState) -> Option<UserCommand> {
    let text = view_state.input(field).to_string();
    match field {
        InputField::Player => {
            (!text.trim().is_empty()).then_some(UserCommand::LoadPlayer(text))
        }
        InputField::Opponent => Some(UserCommand::SetOpponent(text)),
        InputField::Thresholds => Some(UserCommand::SetThresholds(text)),
    }
}

/// Player -> Opponent -> Thresholds -> (dashboard) -> Player
fn next_focus(current: Option<InputField>) -> Option<InputField> {
    match current {
        None => Some(InputField::Player),
        Some(InputField::Player) => Some(InputField::Opponent),
        Some(InputField::Opponent) => Some(InputField::Thresholds),
        Some(InputField::Thresholds) => None,
    }
}

fn prev_focus(current: Option<InputField>) -> Option<InputField> {
    match current {
        None => Some(InputField::Thresholds),
        Some(InputField::Player) => None,
        Some(InputField::Opponent) => Some(InputField::Player),
        Some(InputField::Thresholds) => Some(InputField::Opponent),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use slugline_baseball::stats::category::Category;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert!(handle_key(key(KeyCode::Char(c)), state).is_none());
        }
    }

    fn dashboard() -> ViewState {
        ViewState {
            focus: None,
            ..ViewState::default()
        }
    }

    // -- Text fields --

    #[test]
    fn typing_edits_focused_field() {
        let mut state = ViewState::default();
        type_text(&mut state, "Shohei Ohtani");
        assert_eq!(state.player_input, "Shohei Ohtani");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.player_input, "Shohei Ohtan");
    }

    #[test]
    fn shortcut_letters_are_text_while_editing() {
        let mut state = ViewState::default();
        type_text(&mut state, "qcsr");
        assert_eq!(state.player_input, "qcsr");
        assert_eq!(state.focus, Some(InputField::Player));
    }

    #[test]
    fn enter_submits_player() {
        let mut state = ViewState::default();
        type_text(&mut state, "Aaron Judge");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(cmd, Some(UserCommand::LoadPlayer("Aaron Judge".to_string())));
        assert_eq!(state.focus, None);
    }

    #[test]
    fn enter_on_blank_player_sends_nothing() {
        let mut state = ViewState::default();
        type_text(&mut state, "   ");
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
    }

    #[test]
    fn enter_submits_opponent_and_thresholds() {
        let mut state = ViewState::default();
        state.focus = Some(InputField::Opponent);
        type_text(&mut state, "sf");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::SetOpponent("sf".to_string()))
        );

        state.focus = Some(InputField::Thresholds);
        state.thresholds_input.clear();
        type_text(&mut state, "1,3");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::SetThresholds("1,3".to_string()))
        );
    }

    #[test]
    fn tab_cycles_fields_then_dashboard() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, Some(InputField::Opponent));
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, Some(InputField::Thresholds));
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, None);
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, Some(InputField::Player));
        handle_key(key(KeyCode::BackTab), &mut state);
        assert_eq!(state.focus, None);
    }

    #[test]
    fn esc_leaves_field_without_submitting() {
        let mut state = ViewState::default();
        type_text(&mut state, "abc");
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert_eq!(state.focus, None);
        assert_eq!(state.player_input, "abc");
    }

    // -- Dashboard shortcuts --

    #[test]
    fn c_cycles_category_forward_and_back() {
        let mut state = dashboard();
        assert_eq!(
            handle_key(key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::SetCategory(Category::Doubles))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('C')), &mut state),
            Some(UserCommand::SetCategory(Category::Singles))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('C')), &mut state),
            Some(UserCommand::SetCategory(Category::Hits))
        );
    }

    #[test]
    fn season_and_career_shortcuts() {
        let mut state = dashboard();
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::LoadSeason)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::LoadCareer)
        );
    }

    #[test]
    fn focus_shortcuts() {
        let mut state = dashboard();
        handle_key(key(KeyCode::Char('o')), &mut state);
        assert_eq!(state.focus, Some(InputField::Opponent));
        state.focus = None;
        handle_key(key(KeyCode::Char('t')), &mut state);
        assert_eq!(state.focus, Some(InputField::Thresholds));
        state.focus = None;
        handle_key(key(KeyCode::Char('p')), &mut state);
        assert_eq!(state.focus, Some(InputField::Player));
    }

    // -- Quit --

    #[test]
    fn q_quits_from_dashboard() {
        let mut state = dashboard();
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_quits_while_editing() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
        assert!(state.player_input.is_empty());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = dashboard();
        let mut ev = key(KeyCode::Char('q'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(handle_key(ev, &mut state), None);
    }
}
