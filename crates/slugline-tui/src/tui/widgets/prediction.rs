// Prediction widget: next-game stat line against the selected opponent.
//
// Rate-like categories read as a percentage chance; total bases reads as
// an expected count.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use slugline_baseball::stats::predict::{PredictedStat, PredictedStatLine};

use crate::tui::ViewState;

/// Render the prediction panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let analysis = state.analysis.as_ref();
    let opponent = analysis.and_then(|a| a.opponent.as_deref());
    let prediction = analysis.and_then(|a| a.prediction.as_ref());

    let (title, lines) = match (opponent, prediction) {
        (Some(opponent), Some(prediction)) => (
            format!("Predicted Stat Line vs. {}", title_case(opponent)),
            prediction_lines(prediction),
        ),
        _ => (
            "Predicted Stat Line".to_string(),
            vec![Line::from(Span::styled(
                " Set an opponent to see a prediction",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// One line per predicted category.
pub fn prediction_lines(prediction: &PredictedStatLine) -> Vec<Line<'static>> {
    prediction.stats.iter().map(stat_line).collect()
}

fn stat_line(stat: &PredictedStat) -> Line<'static> {
    let name = format!(
        " {} ({}): ",
        stat.category.display_name(),
        stat.category.label()
    );
    let value = match stat.chance_percent() {
        Some(percent) => format!("{}% chance", percent),
        None => format!("{:.2} bases expected", stat.expected),
    };
    Line::from(vec![
        Span::styled(name, Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Capitalize the first letter of each word: "san francisco" -> "San Francisco".
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
