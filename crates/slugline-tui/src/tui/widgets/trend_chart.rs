// Trend chart widget: per-game bars for the selected category with a
// dotted line at each threshold.
//
// Games without a single total base are drawn as short dark stubs so the
// game still shows on the axis.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use slugline_baseball::stats::category::Category;
use slugline_baseball::stats::games::GameStatLine;

use crate::tui::ViewState;

/// Height of the stub drawn for games with zero total bases.
const ZERO_STUB: f64 = 0.1;

/// Spacing between dots of a threshold line.
const THRESHOLD_STEP: f64 = 0.25;

/// Plot points for one category over a run of games.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// (game index, value) for games with at least one total base.
    pub bars: Vec<(f64, f64)>,
    /// (game index, stub height) for games with zero total bases.
    pub empty: Vec<(f64, f64)>,
    pub y_max: f64,
    /// Date labels for the first, middle and last game.
    pub x_labels: Vec<String>,
}

/// Build plot points for `games`, oldest first. `y_max` leaves one unit of
/// headroom over the tallest bar or threshold.
pub fn chart_series(games: &[GameStatLine], category: Category, thresholds: &[u32]) -> ChartSeries {
    let mut bars = Vec::new();
    let mut empty = Vec::new();
    for (i, game) in games.iter().enumerate() {
        let x = i as f64;
        if game.total_bases == 0 {
            empty.push((x, ZERO_STUB));
        } else {
            bars.push((x, category.game_value(game) as f64));
        }
    }

    let tallest = games
        .iter()
        .map(|g| category.game_value(g))
        .chain(thresholds.iter().copied())
        .max()
        .unwrap_or(0);

    let x_labels = match games.len() {
        0 => Vec::new(),
        1 => vec![short_date(&games[0])],
        n => vec![
            short_date(&games[0]),
            short_date(&games[n / 2]),
            short_date(&games[n - 1]),
        ],
    };

    ChartSeries {
        bars,
        empty,
        y_max: tallest as f64 + 1.0,
        x_labels,
    }
}

fn short_date(game: &GameStatLine) -> String {
    game.game_date.format("%m/%d").to_string()
}

/// Dotted horizontal line at `threshold` across `game_count` games.
pub fn threshold_points(threshold: u32, game_count: usize) -> Vec<(f64, f64)> {
    let end = game_count.saturating_sub(1) as f64;
    let steps = (end / THRESHOLD_STEP).round() as usize;
    (0..=steps)
        .map(|i| (i as f64 * THRESHOLD_STEP, threshold as f64))
        .collect()
}

/// Render the trend chart into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(analysis) = state.analysis.as_ref() else {
        let paragraph = Paragraph::new(Line::from(" Load a player to see game trends"))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Trend"));
        frame.render_widget(paragraph, area);
        return;
    };

    let category = analysis.category;
    let series = chart_series(&analysis.games, category, &analysis.thresholds);
    let threshold_lines: Vec<(String, Vec<(f64, f64)>)> = analysis
        .thresholds
        .iter()
        .map(|&t| {
            (
                format!("{} ≥ {}", category.label(), t),
                threshold_points(t, analysis.games.len()),
            )
        })
        .collect();

    let mut datasets = vec![
        Dataset::default()
            .name(category.display_name())
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::Blue))
            .data(&series.bars),
        Dataset::default()
            .name("No TB")
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::DarkGray))
            .data(&series.empty),
    ];
    for (name, points) in &threshold_lines {
        datasets.push(
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(points),
        );
    }

    let title = match analysis.opponent.as_deref() {
        Some(opponent) => format!(
            "{}: {} per game vs {} (last {})",
            analysis.player.full_name,
            category.display_name(),
            opponent.to_uppercase(),
            analysis.games.len()
        ),
        None => format!(
            "{}: {} per game (last {})",
            analysis.player.full_name,
            category.display_name(),
            analysis.games.len()
        ),
    };

    let x_max = analysis.games.len().max(1) as f64 - 0.5;
    let y_labels: Vec<String> = vec![
        "0".to_string(),
        format!("{:.0}", series.y_max),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Game Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([-0.5, x_max])
                .labels(series.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title(category.label())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, series.y_max])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{analysis, populated_state};

    #[test]
    fn series_splits_zero_tb_games() {
        let view = analysis();
        let series = chart_series(&view.games, Category::HomeRuns, &[1, 2]);
        // Games 1 and 5 had no total bases.
        assert_eq!(series.empty, vec![(0.0, ZERO_STUB), (4.0, ZERO_STUB)]);
        assert_eq!(series.bars, vec![(1.0, 1.0), (2.0, 0.0), (3.0, 0.0)]);
        // Threshold 2 is taller than any bar.
        assert_eq!(series.y_max, 3.0);
        assert_eq!(series.x_labels, vec!["06/01", "06/03", "06/05"]);
    }

    #[test]
    fn series_of_no_games() {
        let series = chart_series(&[], Category::Singles, &[]);
        assert!(series.bars.is_empty());
        assert!(series.x_labels.is_empty());
        assert_eq!(series.y_max, 1.0);
    }

    #[test]
    fn threshold_points_span_games() {
        let points = threshold_points(2, 3);
        assert_eq!(points.first(), Some(&(0.0, 2.0)));
        assert_eq!(points.last(), Some(&(2.0, 2.0)));
        assert_eq!(points.len(), 9);
        assert_eq!(threshold_points(1, 0), vec![(0.0, 1.0)]);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = populated_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let empty = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &empty))
            .unwrap();
    }
}
