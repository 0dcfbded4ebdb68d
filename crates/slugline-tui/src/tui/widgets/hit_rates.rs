// Hit-rate widget: one row per threshold, one column per trailing window.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use slugline_baseball::stats::trend::{TrendResult, WindowRate, TREND_WINDOWS};

use crate::tui::ViewState;

/// Render the hit-rate table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Hit Rates");

    let Some(analysis) = state.analysis.as_ref() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    if analysis.trends.is_empty() {
        let paragraph = Paragraph::new(Line::from(" Enter thresholds, e.g. 1,2"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut header_cells = vec![Cell::from("Trend")];
    header_cells.extend(
        TREND_WINDOWS
            .iter()
            .map(|w| Cell::from(format!("Last {}", w))),
    );
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = analysis.trends.iter().map(trend_row).collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn trend_row(trend: &TrendResult) -> Row<'static> {
    let mut cells = vec![Cell::from(trend.label())];
    for size in TREND_WINDOWS {
        let cell = match trend.window(size) {
            Some(rate) => Cell::from(rate.summary()).style(Style::default().fg(rate_color(rate))),
            None => Cell::from("-"),
        };
        cells.push(cell);
    }
    Row::new(cells)
}

/// Green at 50% or better, yellow from 25%, red below.
pub fn rate_color(rate: &WindowRate) -> Color {
    match rate.percent {
        p if p >= 50 => Color::Green,
        p if p >= 25 => Color::Yellow,
        _ => Color::Red,
    }
}
