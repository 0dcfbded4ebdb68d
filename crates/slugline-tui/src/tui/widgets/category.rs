// Category selector widget: one tab per stat category.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

use slugline_baseball::stats::category::Category;

use crate::tui::ViewState;

/// Render the category tabs into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let titles: Vec<&'static str> = Category::ALL.iter().map(|c| c.label()).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Category: {}", state.category.display_name())),
        )
        .select(selected_index(state.category))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Position of `category` in the selector.
pub fn selected_index(category: Category) -> usize {
    Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_index_follows_selector_order() {
        assert_eq!(selected_index(Category::Singles), 0);
        assert_eq!(selected_index(Category::HomeRuns), 3);
        assert_eq!(selected_index(Category::Hits), 5);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(48, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
