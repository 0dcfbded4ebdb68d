// Status bar widget: loaded player, opponent filter, status message.
// Also renders the key-hint help bar at the bottom of the screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::StatusKind;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [player] [vs opponent] | [status message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let player = state
        .player
        .as_ref()
        .map(|card| card.player.full_name.as_str())
        .unwrap_or("No player");
    spans.push(Span::styled(
        format!(" {} ", player),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));

    if let Some(opponent) = state.analysis.as_ref().and_then(|a| a.opponent.as_ref()) {
        spans.push(Span::styled(
            format!("vs {} ", opponent.to_uppercase()),
            Style::default().fg(Color::Cyan),
        ));
    }

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));

    let (marker, color) = status_indicator(state.status_kind);
    spans.push(Span::styled(
        format!("{} {}", marker, state.status),
        Style::default().fg(color),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the status marker and its color.
pub fn status_indicator(kind: StatusKind) -> (&'static str, Color) {
    match kind {
        StatusKind::Info => ("●", Color::Green),
        StatusKind::Busy => ("…", Color::Yellow),
        StatusKind::Error => ("✖", Color::Red),
    }
}

/// Key hints for the current focus.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.focus.is_some() {
        " Enter:Submit | Tab:Next field | Esc:Done editing | Ctrl+C:Quit"
    } else {
        " p/o/t:Edit player/opponent/thresholds | c/C:Category | s:Season | r:Career | q:Quit"
    }
}

/// Render the help bar into the given area.
pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
