// Dashboard session: current inputs, fetched data, and derived views.
//
// A session owns the provider handle and the last fetched dataset for the
// selected player. Changing the opponent, category or thresholds recomputes
// the analysis from cached events without touching the network.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use tracing::info;

use slugline_baseball::player::{PlayerBio, PlayerMatch};
use slugline_baseball::provider::{DateWindow, StatsProvider};
use slugline_baseball::stats::category::Category;
use slugline_baseball::stats::events::{
    classify, filter_by_opponent, recent_plate_appearances, ClassifiedEvent,
};
use slugline_baseball::stats::games::{aggregate, last_games, GameStatLine};
use slugline_baseball::stats::predict::{predict_stat_line, PredictedStatLine};
use slugline_baseball::stats::season::{
    career_from, per_game_averages, PerGameAverages, SeasonBatting,
};
use slugline_baseball::stats::trend::{hit_rates, parse_thresholds, TrendResult};
use slugline_core::config::Config;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Identity and bio of the loaded player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub player: PlayerMatch,
    pub bio: Option<PlayerBio>,
}

/// Everything derived from the loaded plate appearances for the current
/// inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub player: PlayerMatch,
    /// Trimmed opponent filter, `None` when blank.
    pub opponent: Option<String>,
    pub category: Category,
    pub thresholds: Vec<u32>,
    /// Most recent games after the opponent filter, oldest first.
    pub games: Vec<GameStatLine>,
    pub trends: Vec<TrendResult>,
    /// Only computed when an opponent filter is set.
    pub prediction: Option<PredictedStatLine>,
    /// Most recent plate appearances, newest first, ignoring the filter.
    pub recent_at_bats: Vec<ClassifiedEvent>,
}

/// Current-season lines with per-game averages for the first row.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    pub season: i32,
    pub lines: Vec<SeasonBatting>,
    pub per_game: Option<PerGameAverages>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

struct LoadedPlayer {
    card: PlayerCard,
    events: Vec<ClassifiedEvent>,
}

pub struct Session {
    provider: Arc<dyn StatsProvider>,
    config: Config,
    today: NaiveDate,
    loaded: Option<LoadedPlayer>,
    opponent: String,
    category: Category,
    thresholds: Vec<u32>,
    season: Option<SeasonSummary>,
    career: Option<Vec<SeasonBatting>>,
}

impl Session {
    /// Start a session with the configured default category and thresholds.
    /// `today` anchors the plate-appearance window and the current season.
    pub fn new(provider: Arc<dyn StatsProvider>, config: Config, today: NaiveDate) -> Self {
        let category =
            Category::from_label(&config.analysis.default_category).unwrap_or(Category::Singles);
        let thresholds = config.analysis.default_thresholds.clone();
        Self {
            provider,
            config,
            today,
            loaded: None,
            opponent: String::new(),
            category,
            thresholds,
            season: None,
            career: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    pub fn opponent(&self) -> &str {
        &self.opponent
    }

    pub fn player_card(&self) -> Option<&PlayerCard> {
        self.loaded.as_ref().map(|l| &l.card)
    }

    pub fn events(&self) -> &[ClassifiedEvent] {
        self.loaded
            .as_ref()
            .map(|l| l.events.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve `name`, then fetch its bio and recent plate appearances.
    ///
    /// Returns `Ok(false)` when no player matches, which clears the previous
    /// player and every derived view. On error the previous player stays
    /// loaded; it is only replaced once every request has succeeded.
    pub async fn load_player(&mut self, name: &str) -> anyhow::Result<bool> {
        let Some(player) = self
            .provider
            .lookup_player(name)
            .await
            .with_context(|| format!("player lookup for '{}' failed", name.trim()))?
        else {
            info!("no player found for '{}'", name.trim());
            self.clear_player();
            return Ok(false);
        };

        let bio = self
            .provider
            .player_bio(player.id)
            .await
            .context("failed to load player bio")?;

        let window = DateWindow::trailing(self.today, self.config.provider.lookback_days);
        let rows = self
            .provider
            .plate_appearances(player.id, window)
            .await
            .context("failed to load Statcast data")?;
        let events = classify(&rows);
        info!(
            "loaded {} ({}): {} rows, {} plate appearances",
            player.full_name,
            player.id,
            rows.len(),
            events.len()
        );

        self.clear_player();
        self.loaded = Some(LoadedPlayer {
            card: PlayerCard { player, bio },
            events,
        });
        Ok(true)
    }

    fn clear_player(&mut self) {
        self.loaded = None;
        self.season = None;
        self.career = None;
    }

    pub fn set_opponent(&mut self, opponent: &str) {
        self.opponent = opponent.trim().to_string();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Parse comma-separated thresholds; non-numeric items are dropped.
    pub fn set_thresholds(&mut self, text: &str) {
        self.thresholds = parse_thresholds(text);
    }

    /// Derived view for the current inputs, or `None` with no player loaded.
    pub fn analysis(&self) -> Option<AnalysisView> {
        let loaded = self.loaded.as_ref()?;
        let analysis = &self.config.analysis;

        let opponent = (!self.opponent.is_empty()).then(|| self.opponent.clone());
        let filtered = match &opponent {
            Some(query) => filter_by_opponent(&loaded.events, query),
            None => loaded.events.clone(),
        };

        let games = last_games(&aggregate(&filtered), analysis.recent_games);
        let trends = hit_rates(&games, self.category, &self.thresholds, analysis.denominator);
        let prediction = opponent.as_ref().map(|_| {
            predict_stat_line(
                &loaded.events,
                &filtered,
                &games,
                &self.config.prediction_weights,
                analysis.missing_average,
            )
        });

        Some(AnalysisView {
            player: loaded.card.player.clone(),
            opponent,
            category: self.category,
            thresholds: self.thresholds.clone(),
            games,
            trends,
            prediction,
            recent_at_bats: recent_plate_appearances(&loaded.events, analysis.recent_at_bats),
        })
    }

    /// Fetch the current season's lines. `Ok(None)` with no player loaded.
    pub async fn load_season(&mut self) -> anyhow::Result<Option<&SeasonSummary>> {
        let Some(loaded) = &self.loaded else {
            return Ok(None);
        };
        let year = self.today.year();
        let lines = self
            .provider
            .season_batting(loaded.card.player.id, year)
            .await
            .context("failed to load season stats")?;
        let per_game = lines.first().map(per_game_averages);
        self.season = Some(SeasonSummary {
            season: year,
            lines,
            per_game,
        });
        Ok(self.season.as_ref())
    }

    /// Fetch every season from the configured start year onward.
    /// `Ok(None)` with no player loaded.
    pub async fn load_career(&mut self) -> anyhow::Result<Option<&[SeasonBatting]>> {
        let Some(loaded) = &self.loaded else {
            return Ok(None);
        };
        let lines = self
            .provider
            .career_batting(loaded.card.player.id)
            .await
            .context("failed to load career stats")?;
        self.career = Some(career_from(&lines, self.config.provider.career_start_year));
        Ok(self.career.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use slugline_baseball::player::PlayerId;
    use slugline_baseball::provider::ProviderError;
    use slugline_baseball::stats::events::RawPlateAppearance;
    use slugline_core::config::{
        AnalysisConfig, DenominatorPolicy, MissingAverage, PredictionWeights, ProviderConfig,
    };

    fn test_config() -> Config {
        Config {
            provider: ProviderConfig {
                statcast_url: "http://localhost/csv".to_string(),
                stats_api_url: "http://localhost/api".to_string(),
                request_timeout_secs: 5,
                lookback_days: 60,
                career_start_year: 2015,
            },
            analysis: AnalysisConfig {
                recent_games: 10,
                recent_at_bats: 3,
                default_thresholds: vec![1, 2],
                default_category: "HR".to_string(),
                denominator: DenominatorPolicy::Nominal,
                missing_average: MissingAverage::Zero,
            },
            prediction_weights: PredictionWeights::default(),
        }
    }

    fn pa(day: u32, home: &str, event: &str) -> RawPlateAppearance {
        RawPlateAppearance {
            game_date: NaiveDate::from_ymd_opt(2025, 6, day),
            events: Some(event.to_string()),
            inning_topbot: Some("Top".to_string()),
            home_team: Some(home.to_string()),
            away_team: Some("LAD".to_string()),
            ..Default::default()
        }
    }

    struct StubProvider;

    #[async_trait]
    impl StatsProvider for StubProvider {
        async fn lookup_player(&self, name: &str) -> Result<Option<PlayerMatch>, ProviderError> {
            let name = name.to_lowercase();
            if name.contains("outage") {
                return Err(ProviderError::Status {
                    url: "http://localhost/api/people/search".to_string(),
                    status: 503,
                });
            }
            if name.contains("no bio") {
                return Ok(Some(PlayerMatch {
                    id: PlayerId(1),
                    full_name: "No Bio".to_string(),
                }));
            }
            Ok(name.contains("ohtani").then(|| PlayerMatch {
                id: PlayerId(660271),
                full_name: "Shohei Ohtani".to_string(),
            }))
        }

        async fn plate_appearances(
            &self,
            _id: PlayerId,
            _window: DateWindow,
        ) -> Result<Vec<RawPlateAppearance>, ProviderError> {
            Ok(vec![
                pa(1, "SF", "strikeout"),
                pa(2, "SF", "home_run"),
                pa(3, "SD", "single"),
                pa(4, "SF", "home_run"),
                pa(4, "SF", "home_run"),
                pa(5, "SD", "home_run"),
            ])
        }

        async fn player_bio(&self, id: PlayerId) -> Result<Option<PlayerBio>, ProviderError> {
            if id == PlayerId(1) {
                return Err(ProviderError::Client("bio request timed out".to_string()));
            }
            Ok(Some(PlayerBio {
                full_name: "Shohei Ohtani".to_string(),
                ..Default::default()
            }))
        }

        async fn season_batting(
            &self,
            _id: PlayerId,
            season: i32,
        ) -> Result<Vec<SeasonBatting>, ProviderError> {
            Ok(vec![SeasonBatting {
                season,
                team: "LAD".to_string(),
                games: 100,
                at_bats: 400,
                hits: 120,
                home_runs: 40,
                rbi: 90,
                stolen_bases: 20,
                walks: 60,
                strikeouts: 110,
                ops: Some(1.01),
            }])
        }

        async fn career_batting(&self, id: PlayerId) -> Result<Vec<SeasonBatting>, ProviderError> {
            let mut lines = Vec::new();
            for year in [2013, 2018, 2024] {
                lines.extend(self.season_batting(id, year).await?);
            }
            Ok(lines)
        }
    }

    fn session() -> Session {
        Session::new(
            Arc::new(StubProvider),
            test_config(),
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        )
    }

    #[test]
    fn defaults_come_from_config() {
        let s = session();
        assert_eq!(s.category(), Category::HomeRuns);
        assert_eq!(s.thresholds(), &[1, 2]);
        assert!(s.analysis().is_none());
    }

    #[tokio::test]
    async fn load_player_builds_analysis() {
        let mut s = session();
        assert!(s.load_player("Shohei Ohtani").await.unwrap());
        assert_eq!(s.events().len(), 6);

        let view = s.analysis().unwrap();
        assert_eq!(view.games.len(), 5);
        assert_eq!(view.trends.len(), 2);
        assert!(view.prediction.is_none());
        assert_eq!(view.recent_at_bats.len(), 3);
        assert_eq!(view.recent_at_bats[0].game_date, NaiveDate::from_ymd_opt(2025, 6, 5));

        // HR >= 1 in 3 of the 5 games; the nominal last-10 divisor is 10.
        assert_eq!(view.trends[0].window(10).unwrap().summary(), "3/10 (30%)");
        assert_eq!(view.trends[1].window(3).unwrap().summary(), "1/3 (33%)");
    }

    #[tokio::test]
    async fn opponent_filter_enables_prediction() {
        let mut s = session();
        s.load_player("ohtani").await.unwrap();
        s.set_opponent("  sf ");
        assert_eq!(s.opponent(), "sf");

        let view = s.analysis().unwrap();
        assert_eq!(view.opponent.as_deref(), Some("sf"));
        assert!(view.games.iter().all(|g| g.opponent == "SF"));
        assert_eq!(view.games.len(), 3);
        // At-bats ignore the opponent filter.
        assert_eq!(view.recent_at_bats[0].opponent, "SD");

        let prediction = view.prediction.unwrap();
        assert_eq!(prediction.stats.len(), 5);

        s.set_opponent("");
        assert!(s.analysis().unwrap().prediction.is_none());
    }

    #[tokio::test]
    async fn category_and_thresholds_recompute() {
        let mut s = session();
        s.load_player("ohtani").await.unwrap();
        s.set_category(Category::Singles);
        s.set_thresholds("1, x, 3");
        let view = s.analysis().unwrap();
        assert_eq!(view.category, Category::Singles);
        assert_eq!(view.thresholds, vec![1, 3]);
        assert_eq!(view.trends[0].window(5).unwrap().hits, 1);
        assert_eq!(view.trends[1].window(5).unwrap().hits, 0);
    }

    #[tokio::test]
    async fn unknown_player_clears_views() {
        let mut s = session();
        s.load_player("ohtani").await.unwrap();
        s.load_season().await.unwrap();
        assert!(!s.load_player("Nobody Atall").await.unwrap());
        assert!(s.analysis().is_none());
        assert!(s.player_card().is_none());
        assert!(s.load_season().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_player() {
        let mut s = session();
        s.load_player("ohtani").await.unwrap();
        s.load_season().await.unwrap();

        let err = s.load_player("outage").await.unwrap_err();
        assert!(format!("{err:#}").contains("player lookup for 'outage' failed"));
        assert_eq!(s.player_card().unwrap().player.full_name, "Shohei Ohtani");
        assert_eq!(s.events().len(), 6);

        // A lookup that succeeds but a later request that fails also keeps it.
        assert!(s.load_player("no bio").await.is_err());
        assert_eq!(s.player_card().unwrap().player.id, PlayerId(660271));

        s.set_opponent("sf");
        let view = s.analysis().unwrap();
        assert_eq!(view.opponent.as_deref(), Some("sf"));
        assert!(view.prediction.is_some());
        assert!(s.load_season().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn season_and_career() {
        let mut s = session();
        s.load_player("ohtani").await.unwrap();

        let season = s.load_season().await.unwrap().unwrap();
        assert_eq!(season.season, 2025);
        assert_eq!(season.per_game.unwrap().home_runs, 0.4);

        let career = s.load_career().await.unwrap().unwrap();
        let seasons: Vec<i32> = career.iter().map(|l| l.season).collect();
        assert_eq!(seasons, vec![2018, 2024]);
    }
}
