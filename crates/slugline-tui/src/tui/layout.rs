// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------------------+
// | Status Bar (1 row)                                           |
// +---------------------------------------+----------------------+
// | Input Bar (70%)                       | Category (30%)       |
// +-------------------+-------------------+----------------------+
// | Bio (11 rows)     | Trend Chart (60%)                        |
// +-------------------+                                          |
// | Season / Career   +-------------------------+----------------+
// |                   | Hit Rates (60%)         | Prediction     |
// +-------------------+-------------------------+----------------+
// | Last At-Bats (12 rows)                                       |
// +--------------------------------------------------------------+
// | Help Bar (1 row)                                             |
// +--------------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Player, opponent and threshold text fields.
    pub input_bar: Rect,
    pub category: Rect,
    pub bio: Rect,
    /// Season line, per-game averages, and career table when loaded.
    pub season: Rect,
    pub trend_chart: Rect,
    pub hit_rates: Rect,
    pub prediction: Rect,
    pub at_bats: Rect,
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | inputs(3) | middle(fill) | at-bats(12) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Length(3),  // input bar + category
            Constraint::Min(10),    // middle section
            Constraint::Length(12), // last at-bats
            Constraint::Length(1),  // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let controls = vertical[1];
    let middle = vertical[2];
    let at_bats = vertical[3];
    let help_bar = vertical[4];

    let controls_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(controls);

    // Middle: player column (35%) | analysis column (65%)
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(middle);

    let player_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(3)])
        .split(columns[0]);

    let analysis_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    let lower_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(analysis_column[1]);

    AppLayout {
        status_bar,
        input_bar: controls_row[0],
        category: controls_row[1],
        bio: player_column[0],
        season: player_column[1],
        trend_chart: analysis_column[0],
        hit_rates: lower_row[0],
        prediction: lower_row[1],
        at_bats,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 10] {
        [
            ("status_bar", layout.status_bar),
            ("input_bar", layout.input_bar),
            ("category", layout.category),
            ("bio", layout.bio),
            ("season", layout.season),
            ("trend_chart", layout.trend_chart),
            ("hit_rates", layout.hit_rates),
            ("prediction", layout.prediction),
            ("at_bats", layout.at_bats),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_heights() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.input_bar.height, 3);
        assert_eq!(layout.at_bats.height, 12);
        assert_eq!(layout.bio.height, 11);
    }

    #[test]
    fn layout_chart_wider_than_bio() {
        let layout = build_layout(test_area());
        assert!(layout.trend_chart.width > layout.bio.width);
    }

    #[test]
    fn layout_chart_above_tables() {
        let layout = build_layout(test_area());
        assert!(layout.trend_chart.y < layout.hit_rates.y);
        assert_eq!(layout.hit_rates.y, layout.prediction.y);
        assert!(layout.hit_rates.x < layout.prediction.x);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.x + rect.width <= area.width,
                "{name} {:?} exceeds area width {}",
                rect,
                area.width
            );
            assert!(
                rect.y + rect.height <= area.height,
                "{name} {:?} exceeds area height {}",
                rect,
                area.height
            );
        }
    }
}
