// External batting data sources.
//
// `StatsProvider` is the seam between the dashboard and the network. The
// live implementation splits work between the Statcast search CSV endpoint
// (plate appearances) and the MLB Stats API (lookup, bio, season lines).
// `CachedProvider` memoizes any provider per operation and arguments.

pub mod cached;
pub mod mlb;
pub mod savant;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use slugline_core::config::ProviderConfig;
use thiserror::Error;

use crate::player::{PlayerBio, PlayerId, PlayerMatch};
use crate::stats::events::RawPlateAppearance;
use crate::stats::season::SeasonBatting;

pub use cached::CachedProvider;
pub use mlb::MlbStatsClient;
pub use savant::SavantClient;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read CSV response: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

// ---------------------------------------------------------------------------
// Query window
// ---------------------------------------------------------------------------

/// Inclusive date range for a plate-appearance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The `days` days ending at `end`.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        DateWindow { start, end }
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Resolve a free-text name to a single player. `Ok(None)` when nothing
    /// matches.
    async fn lookup_player(&self, name: &str) -> Result<Option<PlayerMatch>, ProviderError>;

    /// Pitch-level Statcast rows for a batter over `window`.
    async fn plate_appearances(
        &self,
        id: PlayerId,
        window: DateWindow,
    ) -> Result<Vec<RawPlateAppearance>, ProviderError>;

    async fn player_bio(&self, id: PlayerId) -> Result<Option<PlayerBio>, ProviderError>;

    /// Hitting lines for one season, one row per team stint.
    async fn season_batting(
        &self,
        id: PlayerId,
        season: i32,
    ) -> Result<Vec<SeasonBatting>, ProviderError>;

    /// Every major-league season on record, oldest first.
    async fn career_batting(&self, id: PlayerId) -> Result<Vec<SeasonBatting>, ProviderError>;
}

// ---------------------------------------------------------------------------
// Live provider
// ---------------------------------------------------------------------------

/// Network-backed provider combining both clients.
pub struct LiveProvider {
    savant: SavantClient,
    mlb: MlbStatsClient,
}

impl LiveProvider {
    pub fn new(savant: SavantClient, mlb: MlbStatsClient) -> Self {
        Self { savant, mlb }
    }

    /// Build both clients sharing one HTTP connection pool.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = build_http_client(config.request_timeout_secs)?;
        Ok(Self::new(
            SavantClient::new(http.clone(), config.statcast_url.clone()),
            MlbStatsClient::new(http, config.stats_api_url.clone()),
        ))
    }
}

#[async_trait]
impl StatsProvider for LiveProvider {
    async fn lookup_player(&self, name: &str) -> Result<Option<PlayerMatch>, ProviderError> {
        self.mlb.lookup_player(name).await
    }

    async fn plate_appearances(
        &self,
        id: PlayerId,
        window: DateWindow,
    ) -> Result<Vec<RawPlateAppearance>, ProviderError> {
        self.savant.plate_appearances(id, window).await
    }

    async fn player_bio(&self, id: PlayerId) -> Result<Option<PlayerBio>, ProviderError> {
        self.mlb.player_bio(id).await
    }

    async fn season_batting(
        &self,
        id: PlayerId,
        season: i32,
    ) -> Result<Vec<SeasonBatting>, ProviderError> {
        self.mlb.season_batting(id, season).await
    }

    async fn career_batting(&self, id: PlayerId) -> Result<Vec<SeasonBatting>, ProviderError> {
        self.mlb.career_batting(id).await
    }
}

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("slugline/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::Client(e.to_string()))
}

/// Send a GET and return the body text, mapping transport and status
/// failures to `ProviderError`.
pub(crate) async fn get_text(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<String, ProviderError> {
    let http_err = |source| ProviderError::Http {
        url: url.to_string(),
        source,
    };
    let response = request.send().await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(http_err)
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------
