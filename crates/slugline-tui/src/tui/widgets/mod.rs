// TUI widget modules for each dashboard panel.

pub mod at_bats;
pub mod bio;
pub mod category;
pub mod hit_rates;
pub mod input_bar;
pub mod prediction;
pub mod season;
pub mod status_bar;
pub mod trend_chart;
