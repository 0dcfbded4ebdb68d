// Season widget: current-season batting line with per-game averages, or
// the year-by-year career table once it has been loaded.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use slugline_baseball::stats::season::SeasonBatting;

use crate::session::SeasonSummary;
use crate::tui::ViewState;

/// Render the season or career panel into the given area.
///
/// Career data takes precedence once loaded.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if let Some(career) = state.career.as_ref() {
        render_career(frame, area, career);
    } else if let Some(summary) = state.season.as_ref() {
        render_season(frame, area, summary);
    } else {
        let paragraph = Paragraph::new(Line::from(" Press s for season stats, r for career"))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Season"));
        frame.render_widget(paragraph, area);
    }
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn format_ops(ops: Option<f64>) -> String {
    ops.map_or_else(|| "N/A".to_string(), |v| format!("{:.3}", v))
}

fn render_season(frame: &mut Frame, area: Rect, summary: &SeasonSummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} Season", summary.season));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let table_height = (summary.lines.len() as u16 + 1).min(inner.height);
    let table_area = Rect {
        height: table_height,
        ..inner
    };
    let averages_area = Rect {
        y: inner.y + table_height,
        height: inner.height - table_height,
        ..inner
    };

    let header = Row::new(
        ["Team", "G", "AB", "H", "HR", "RBI", "SB", "BB", "SO", "OPS"]
            .into_iter()
            .map(Cell::from),
    )
    .style(header_style());

    let rows: Vec<Row> = summary
        .lines
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(line.team.clone()),
                Cell::from(line.games.to_string()),
                Cell::from(line.at_bats.to_string()),
                Cell::from(line.hits.to_string()),
                Cell::from(line.home_runs.to_string()),
                Cell::from(line.rbi.to_string()),
                Cell::from(line.stolen_bases.to_string()),
                Cell::from(line.walks.to_string()),
                Cell::from(line.strikeouts.to_string()),
                Cell::from(format_ops(line.ops)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(8),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), table_area);

    if let Some(per_game) = summary.per_game.as_ref() {
        let lines: Vec<Line> = per_game
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!(" {:<9}", label), Style::default().fg(Color::Gray)),
                    Span::styled(value, Style::default().fg(Color::White)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), averages_area);
    }
}

fn render_career(frame: &mut Frame, area: Rect, career: &[SeasonBatting]) {
    let header = Row::new(
        ["Season", "Team", "G", "AB", "H", "HR", "RBI", "BB", "SO", "OPS"]
            .into_iter()
            .map(Cell::from),
    )
    .style(header_style());

    let rows: Vec<Row> = career
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(line.season.to_string()),
                Cell::from(line.team.clone()),
                Cell::from(line.games.to_string()),
                Cell::from(line.at_bats.to_string()),
                Cell::from(line.hits.to_string()),
                Cell::from(line.home_runs.to_string()),
                Cell::from(line.rbi.to_string()),
                Cell::from(line.walks.to_string()),
                Cell::from(line.strikeouts.to_string()),
                Cell::from(format_ops(line.ops)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(8),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Career ({} seasons)", career.len())),
    );
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use slugline_baseball::stats::season::per_game_averages;

    fn line(season: i32) -> SeasonBatting {
        SeasonBatting {
            season,
            team: "Los Angeles Dodgers".to_string(),
            games: 100,
            at_bats: 400,
            hits: 120,
            home_runs: 30,
            rbi: 80,
            stolen_bases: 10,
            walks: 50,
            strikeouts: 110,
            ops: Some(0.95),
        }
    }

    fn rendered_text(state: &ViewState, width: u16, height: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn format_ops_handles_missing() {
        assert_eq!(format_ops(None), "N/A");
        assert_eq!(format_ops(Some(0.9)), "0.900");
    }

    #[test]
    fn renders_season_with_per_game_rows() {
        let mut state = ViewState::default();
        let current = line(2025);
        state.season = Some(SeasonSummary {
            season: 2025,
            per_game: Some(per_game_averages(&current)),
            lines: vec![current],
        });
        let text = rendered_text(&state, 70, 12);
        assert!(text.contains("2025 Season"));
        assert!(text.contains("HR/Game"));
        assert!(text.contains("0.30"));
    }

    #[test]
    fn career_takes_precedence() {
        let mut state = ViewState::default();
        state.season = Some(SeasonSummary {
            season: 2025,
            lines: vec![line(2025)],
            per_game: None,
        });
        state.career = Some(vec![line(2023), line(2024)]);
        let text = rendered_text(&state, 70, 12);
        assert!(text.contains("Career (2 seasons)"));
        assert!(text.contains("2023"));
    }

    #[test]
    fn render_tiny_area_does_not_panic() {
        let mut state = ViewState::default();
        state.season = Some(SeasonSummary {
            season: 2025,
            lines: vec![line(2025), line(2025)],
            per_game: None,
        });
        rendered_text(&state, 20, 3);
    }
}
