// Last at-bats widget: most recent plate appearances, newest first.
//
// Columns: Date, Opp, Event, Result, Pitch, Launch Speed, Angle, Distance

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use slugline_baseball::stats::events::{ClassifiedEvent, Outcome};

use crate::tui::ViewState;

/// Render the last at-bats table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let events: &[ClassifiedEvent] = state
        .analysis
        .as_ref()
        .map(|a| a.recent_at_bats.as_slice())
        .unwrap_or(&[]);

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Opp"),
        Cell::from("Event"),
        Cell::from("Result"),
        Cell::from("Pitch"),
        Cell::from("Launch Speed"),
        Cell::from("Angle"),
        Cell::from("Distance"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = events
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(
                    event
                        .game_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(event.opponent.clone()),
                Cell::from(event.outcome.label().to_string()),
                Cell::from(event.description.clone().unwrap_or_default()),
                Cell::from(event.pitch_name.clone().unwrap_or_default()),
                Cell::from(format_measure(event.launch_speed, 1)),
                Cell::from(format_measure(event.launch_angle, 0)),
                Cell::from(format_measure(event.hit_distance, 0)),
            ])
            .style(Style::default().fg(outcome_color(&event.outcome)))
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Min(14),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(8),
    ];

    let title = format!("Last {} At-Bats", events.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// Format an optional tracking measurement, or "-" when absent.
pub fn format_measure(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Hits stand out; home runs most of all.
pub fn outcome_color(outcome: &Outcome) -> Color {
    match outcome {
        Outcome::HomeRun => Color::Magenta,
        Outcome::Single | Outcome::Double | Outcome::Triple => Color::Green,
        Outcome::Other(_) => Color::White,
    }
}
