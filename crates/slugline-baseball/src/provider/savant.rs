// Statcast search CSV client.
//
// The search endpoint returns one row per pitch with ~90 columns. Only the
// columns named by `RawPlateAppearance` are read; everything else is ignored.

use tracing::{debug, info, warn};

use crate::player::PlayerId;
use crate::provider::{get_text, DateWindow, ProviderError};
use crate::stats::events::RawPlateAppearance;

/// Column that marks the final pitch of a plate appearance.
const EVENTS_COLUMN: &str = "events";

pub struct SavantClient {
    http: reqwest::Client,
    base_url: String,
}

impl SavantClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Query parameters for a regular-season and postseason batter search.
    fn query(id: PlayerId, window: DateWindow) -> Vec<(&'static str, String)> {
        vec![
            ("all", "true".to_string()),
            ("player_type", "batter".to_string()),
            ("batters_lookup[]", id.to_string()),
            ("game_date_gt", window.start.format("%Y-%m-%d").to_string()),
            ("game_date_lt", window.end.format("%Y-%m-%d").to_string()),
            ("hfGT", "R|PO|S|".to_string()),
            ("min_pitches", "0".to_string()),
            ("min_results", "0".to_string()),
            ("group_by", "name".to_string()),
            ("sort_col", "pitches".to_string()),
            ("sort_order", "desc".to_string()),
            ("type", "details".to_string()),
        ]
    }

    pub async fn plate_appearances(
        &self,
        id: PlayerId,
        window: DateWindow,
    ) -> Result<Vec<RawPlateAppearance>, ProviderError> {
        debug!(
            "fetching Statcast rows for {} from {} to {}",
            id, window.start, window.end
        );
        let request = self.http.get(&self.base_url).query(&Self::query(id, window));
        let body = get_text(request, &self.base_url).await?;
        let rows = parse_statcast_csv(&body)?;
        info!("fetched {} Statcast rows for player {}", rows.len(), id);
        Ok(rows)
    }
}

/// Parse a Statcast search response body.
///
/// An empty body, or one whose header lacks the `events` column, yields no
/// rows. Rows that fail to deserialize are skipped with a warning.
pub fn parse_statcast_csv(body: &str) -> Result<Vec<RawPlateAppearance>, ProviderError> {
    let body = body.trim_start_matches('\u{feff}');
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let has_events = reader
        .headers()?
        .iter()
        .any(|h| h.trim() == EVENTS_COLUMN);
    if !has_events {
        warn!("Statcast response has no `{}` column; treating as empty", EVENTS_COLUMN);
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawPlateAppearance>() {
        match result {
            Ok(raw) => rows.push(raw),
            Err(e) => warn!("skipping malformed Statcast row: {}", e),
        }
    }
    Ok(rows)
}
