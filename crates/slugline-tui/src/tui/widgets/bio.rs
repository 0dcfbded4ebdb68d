// Bio widget: attribute/value table for the loaded player.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the bio panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Player Bio");

    let Some(card) = state.player.as_ref() else {
        let paragraph = Paragraph::new(Line::from(" No player loaded"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let Some(bio) = card.bio.as_ref() else {
        let paragraph = Paragraph::new(Line::from(format!(
            " {} (no bio available)",
            card.player.full_name
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let rows: Vec<Row> = bio
        .attribute_rows(state.today)
        .into_iter()
        .map(|(attribute, value)| {
            Row::new(vec![
                Cell::from(attribute).style(Style::default().fg(Color::Gray)),
                Cell::from(value),
            ])
        })
        .collect();

    let header = Row::new(vec![Cell::from("Attribute"), Cell::from("Value")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, [Constraint::Length(11), Constraint::Min(10)])
        .header(header)
        .block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::populated_state;

    fn rendered_text(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(50, 11);
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
    fn renders_placeholder_without_player() {
        let text = rendered_text(&ViewState::default());
        assert!(text.contains("No player loaded"));
    }

    #[test]
    fn renders_age_from_view_date() {
        let text = rendered_text(&populated_state());
        assert!(text.contains("Shohei Ohtani"));
        assert!(text.contains("31"));
        assert!(text.contains("N/A"));
    }
}
