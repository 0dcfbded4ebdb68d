// MLB Stats API client: player lookup, bio, and hitting lines.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::player::{PlayerBio, PlayerId, PlayerMatch};
use crate::provider::{get_text, ProviderError};
use crate::stats::season::SeasonBatting;

/// Sport id for the major leagues.
const MLB_SPORT_ID: u32 = 1;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    id: u32,
    full_name: String,
    birth_date: Option<String>,
    height: Option<String>,
    weight: Option<u32>,
    primary_position: Option<Position>,
    mlb_debut_date: Option<String>,
    current_team: Option<NamedRef>,
    bat_side: Option<Handedness>,
    pitch_hand: Option<Handedness>,
}

#[derive(Debug, Deserialize)]
struct Position {
    abbreviation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    id: Option<u32>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Handedness {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Debug, Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<Split>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Split {
    season: Option<String>,
    team: Option<NamedRef>,
    sport: Option<NamedRef>,
    num_teams: Option<u32>,
    stat: HittingStat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HittingStat {
    games_played: u32,
    at_bats: u32,
    hits: u32,
    home_runs: u32,
    rbi: u32,
    stolen_bases: u32,
    base_on_balls: u32,
    strike_outs: u32,
    /// Reported as text, e.g. ".912" or "1.036".
    ops: Option<String>,
}

fn parse_api_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

impl From<Person> for PlayerBio {
    fn from(p: Person) -> Self {
        PlayerBio {
            full_name: p.full_name,
            birth_date: parse_api_date(p.birth_date.as_deref()),
            height: p.height,
            weight: p.weight,
            position: p.primary_position.and_then(|pos| pos.abbreviation),
            debut: parse_api_date(p.mlb_debut_date.as_deref()),
            team: p.current_team.and_then(|t| t.name),
            bat_side: p.bat_side.and_then(|h| h.description),
            pitch_hand: p.pitch_hand.and_then(|h| h.description),
        }
    }
}

impl Split {
    fn is_major_league(&self) -> bool {
        self.sport
            .as_ref()
            .and_then(|s| s.id)
            .map_or(true, |id| id == MLB_SPORT_ID)
    }

    fn into_season_line(self, fallback_season: i32) -> SeasonBatting {
        let season = self
            .season
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(fallback_season);
        // A split with no team is the combined line for a traded player.
        let team = match (self.team.and_then(|t| t.name), self.num_teams) {
            (Some(name), _) => name,
            (None, Some(n)) if n > 1 => format!("{n} Teams"),
            (None, _) => "N/A".to_string(),
        };
        let s = self.stat;
        SeasonBatting {
            season,
            team,
            games: s.games_played,
            at_bats: s.at_bats,
            hits: s.hits,
            home_runs: s.home_runs,
            rbi: s.rbi,
            stolen_bases: s.stolen_bases,
            walks: s.base_on_balls,
            strikeouts: s.strike_outs,
            ops: s.ops.as_deref().and_then(|v| v.trim().parse().ok()),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct MlbStatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl MlbStatsClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);
        let body = get_text(self.http.get(&url).query(query), &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// First player whose name matches `name`.
    pub async fn lookup_player(&self, name: &str) -> Result<Option<PlayerMatch>, ProviderError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let resp: PeopleResponse = self
            .get_json(
                "people/search",
                &[
                    ("names", name.to_string()),
                    ("sportIds", MLB_SPORT_ID.to_string()),
                ],
            )
            .await?;
        let found = resp.people.into_iter().next().map(|p| PlayerMatch {
            id: PlayerId(p.id),
            full_name: p.full_name,
        });
        match &found {
            Some(m) => info!("resolved '{}' to {} ({})", name, m.full_name, m.id),
            None => info!("no player matches '{}'", name),
        }
        Ok(found)
    }

    pub async fn player_bio(&self, id: PlayerId) -> Result<Option<PlayerBio>, ProviderError> {
        let resp: PeopleResponse = self
            .get_json(
                &format!("people/{id}"),
                &[("hydrate", "currentTeam".to_string())],
            )
            .await?;
        Ok(resp.people.into_iter().next().map(PlayerBio::from))
    }

    pub async fn season_batting(
        &self,
        id: PlayerId,
        season: i32,
    ) -> Result<Vec<SeasonBatting>, ProviderError> {
        let lines = self
            .hitting_splits(
                id,
                &[
                    ("stats", "season".to_string()),
                    ("season", season.to_string()),
                ],
                season,
            )
            .await?;
        debug!("{} season lines for {} in {}", lines.len(), id, season);
        Ok(lines)
    }

    pub async fn career_batting(&self, id: PlayerId) -> Result<Vec<SeasonBatting>, ProviderError> {
        let mut lines = self
            .hitting_splits(id, &[("stats", "yearByYear".to_string())], 0)
            .await?;
        lines.sort_by_key(|l| l.season);
        debug!("{} career lines for {}", lines.len(), id);
        Ok(lines)
    }

    async fn hitting_splits(
        &self,
        id: PlayerId,
        extra: &[(&str, String)],
        fallback_season: i32,
    ) -> Result<Vec<SeasonBatting>, ProviderError> {
        let mut query = vec![
            ("group", "hitting".to_string()),
            ("sportId", MLB_SPORT_ID.to_string()),
        ];
        query.extend(extra.iter().cloned());
        let resp: StatsResponse = self.get_json(&format!("people/{id}/stats"), &query).await?;
        Ok(resp
            .stats
            .into_iter()
            .flat_map(|group| group.splits)
            .filter(Split::is_major_league)
            .map(|split| split.into_season_line(fallback_season))
            .collect())
    }
}
