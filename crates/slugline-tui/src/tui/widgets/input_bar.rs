// Input bar widget: player, opponent and threshold text fields.
//
// The focused field is highlighted and shows a cursor block.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputField, ViewState};

/// Render the input fields into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(field_spans(state)))
        .block(Block::default().borders(Borders::ALL).title("Search"));
    frame.render_widget(paragraph, area);
}

/// Build label/value spans for every field, in Tab order.
pub fn field_spans(state: &ViewState) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for field in InputField::ALL {
        let focused = state.focus == Some(field);
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}: ", field.label()), label_style));

        let value = state.input(field);
        if focused {
            spans.push(Span::styled(
                format!("{}█", value),
                Style::default().fg(Color::Black).bg(Color::White),
            ));
        } else if value.is_empty() {
            spans.push(Span::styled(
                placeholder(field),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                value.to_string(),
                Style::default().fg(Color::White),
            ));
        }
        spans.push(Span::raw("  "));
    }
    spans
}

fn placeholder(field: InputField) -> &'static str {
    match field {
        InputField::Player => "(name)",
        InputField::Opponent => "(any team)",
        InputField::Thresholds => "(e.g. 1,2)",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
