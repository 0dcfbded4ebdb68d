// Memoizing wrapper around any `StatsProvider`.
//
// Successful responses are cached per operation and arguments for the life
// of the wrapper. Errors are never cached, so a failed request is retried
// on the next call.

use async_trait::async_trait;
use slugline_core::cache::{CacheStats, MemoCache};

use crate::player::{PlayerBio, PlayerId, PlayerMatch};
use crate::provider::{DateWindow, ProviderError, StatsProvider};
use crate::stats::events::RawPlateAppearance;
use crate::stats::season::SeasonBatting;

pub struct CachedProvider<P> {
    inner: P,
    lookups: MemoCache<String, Option<PlayerMatch>>,
    plate_appearances: MemoCache<(PlayerId, DateWindow), Vec<RawPlateAppearance>>,
    bios: MemoCache<PlayerId, Option<PlayerBio>>,
    seasons: MemoCache<(PlayerId, i32), Vec<SeasonBatting>>,
    careers: MemoCache<PlayerId, Vec<SeasonBatting>>,
}

/// Names are matched case-insensitively, ignoring surrounding whitespace.
fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl<P: StatsProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lookups: MemoCache::new("lookup_player"),
            plate_appearances: MemoCache::new("plate_appearances"),
            bios: MemoCache::new("player_bio"),
            seasons: MemoCache::new("season_batting"),
            careers: MemoCache::new("career_batting"),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Per-operation cache counters, in a fixed order.
    pub fn stats(&self) -> Vec<(&'static str, CacheStats)> {
        vec![
            (self.lookups.name(), self.lookups.stats()),
            (self.plate_appearances.name(), self.plate_appearances.stats()),
            (self.bios.name(), self.bios.stats()),
            (self.seasons.name(), self.seasons.stats()),
            (self.careers.name(), self.careers.stats()),
        ]
    }

    /// Forget every cached response.
    pub fn clear(&self) {
        self.lookups.clear();
        self.plate_appearances.clear();
        self.bios.clear();
        self.seasons.clear();
        self.careers.clear();
    }
}

#[async_trait]
impl<P: StatsProvider> StatsProvider for CachedProvider<P> {
    async fn lookup_player(&self, name: &str) -> Result<Option<PlayerMatch>, ProviderError> {
        let key = lookup_key(name);
        if let Some(hit) = self.lookups.get(&key) {
            return Ok(hit);
        }
        let value = self.inner.lookup_player(name).await?;
        self.lookups.insert(key, value.clone());
        Ok(value)
    }

    async fn plate_appearances(
        &self,
        id: PlayerId,
        window: DateWindow,
    ) -> Result<Vec<RawPlateAppearance>, ProviderError> {
        let key = (id, window);
        if let Some(hit) = self.plate_appearances.get(&key) {
            return Ok(hit);
        }
        let value = self.inner.plate_appearances(id, window).await?;
        self.plate_appearances.insert(key, value.clone());
        Ok(value)
    }

    async fn player_bio(&self, id: PlayerId) -> Result<Option<PlayerBio>, ProviderError> {
        if let Some(hit) = self.bios.get(&id) {
            return Ok(hit);
        }
        let value = self.inner.player_bio(id).await?;
        self.bios.insert(id, value.clone());
        Ok(value)
    }

    async fn season_batting(
        &self,
        id: PlayerId,
        season: i32,
    ) -> Result<Vec<SeasonBatting>, ProviderError> {
        let key = (id, season);
        if let Some(hit) = self.seasons.get(&key) {
            return Ok(hit);
        }
        let value = self.inner.season_batting(id, season).await?;
        self.seasons.insert(key, value.clone());
        Ok(value)
    }

    async fn career_batting(&self, id: PlayerId) -> Result<Vec<SeasonBatting>, ProviderError> {
        if let Some(hit) = self.careers.get(&id) {
            return Ok(hit);
        }
        let value = self.inner.career_batting(id).await?;
        self.careers.insert(id, value.clone());
        Ok(value)
    }
}
