use std::env;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::api_client::ReqwestDispatcher;
use crate::client::Dispatcher;
use crate::error::{EnvVarError, Error};
use crate::types::{Category, GameMode, MatchHistoryQuery, MetadataEndpoint, QueryParams, TITLE};

pub const BASE_URL: &str = "https://www.haloapi.com";
pub const API_KEY_VAR: &str = "HALO_API_KEY";

/// Client for the Halo 5 API.
///
/// Every method builds a path under one of the three category roots and
/// hands it to the [`Dispatcher`]. Identifiers (gamertags, match ids, variant
/// ids) are not validated, only escaped as single path segments; invalid ones
/// are rejected by the API.
#[derive(Clone, Debug)]
pub struct HaloApi<D = ReqwestDispatcher> {
    dispatcher: D,
    base_url: Url,
}

pub struct HaloApiBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl HaloApiBuilder {
    // requires HALO_API_KEY env var
    // can use dotenv
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        let api_key = env::var(API_KEY_VAR).map_err(|e| EnvVarError::new(API_KEY_VAR, e))?;
        Ok(HaloApi::builder(&api_key))
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HaloApi, Error> {
        let dispatcher = ReqwestDispatcher::with_timeout(&self.api_key, self.timeout)?;
        HaloApi::with_dispatcher(dispatcher, &self.base_url)
    }
}

impl HaloApi<ReqwestDispatcher> {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: &str) -> HaloApiBuilder {
        HaloApiBuilder {
            api_key: api_key.into(),
            base_url: BASE_URL.into(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        HaloApiBuilder::from_env()?.build()
    }
}

impl<D: Dispatcher> HaloApi<D> {
    /// Fails if `base_url` does not parse or cannot take path segments.
    pub fn with_dispatcher(dispatcher: D, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.into()));
        }
        Ok(Self {
            dispatcher,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the category root and `segments` to the base address. Each
    /// segment is escaped on its own, so `/`, `?` and `#` inside an
    /// identifier stay part of that segment.
    fn url(&self, category: Category, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(category.segments(TITLE))
            .extend(segments);
        Ok(url)
    }

    async fn metadata_request(&self, segments: &[&str]) -> Result<Value, Error> {
        let url = self.url(Category::Metadata, segments)?;
        self.dispatcher
            .get_json(url.as_str(), &QueryParams::new())
            .await
    }

    async fn profile_request(
        &self,
        segments: &[&str],
        query: &QueryParams,
    ) -> Result<Option<String>, Error> {
        let url = self.url(Category::Profile, segments)?;
        self.dispatcher
            .get_redirect_location(url.as_str(), query)
            .await
    }

    async fn stats_request(&self, segments: &[&str], query: &QueryParams) -> Result<Value, Error> {
        let url = self.url(Category::Stats, segments)?;
        self.dispatcher.get_json(url.as_str(), query).await
    }

    // metadata

    /// Fetches one of the argument-less metadata lists.
    pub async fn metadata(&self, endpoint: MetadataEndpoint) -> Result<Value, Error> {
        self.metadata_request(&[endpoint.path()]).await
    }

    pub async fn get_campaign_missions(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::CampaignMissions).await
    }

    pub async fn get_commendations(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Commendations).await
    }

    pub async fn get_csr_designations(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::CsrDesignations).await
    }

    pub async fn get_enemies(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Enemies).await
    }

    pub async fn get_flexible_stats(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::FlexibleStats).await
    }

    pub async fn get_game_base_variants(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::GameBaseVariants).await
    }

    pub async fn get_impulses(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Impulses).await
    }

    pub async fn get_maps(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Maps).await
    }

    pub async fn get_medals(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Medals).await
    }

    pub async fn get_playlists(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Playlists).await
    }

    pub async fn get_skulls(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Skulls).await
    }

    pub async fn get_spartan_ranks(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::SpartanRanks).await
    }

    pub async fn get_team_colors(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::TeamColors).await
    }

    pub async fn get_vehicles(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Vehicles).await
    }

    pub async fn get_weapons(&self) -> Result<Value, Error> {
        self.metadata(MetadataEndpoint::Weapons).await
    }

    pub async fn get_game_variant(&self, id: &str) -> Result<Value, Error> {
        self.metadata_request(&["game-variants", id]).await
    }

    pub async fn get_map_variant(&self, id: &str) -> Result<Value, Error> {
        self.metadata_request(&["map-variants", id]).await
    }

    /// REQ pack metadata.
    pub async fn get_requisition_pack(&self, id: &str) -> Result<Value, Error> {
        self.metadata_request(&["requisition-packs", id]).await
    }

    /// REQ item metadata.
    pub async fn get_requisition(&self, id: &str) -> Result<Value, Error> {
        self.metadata_request(&["requisitions", id]).await
    }

    // profile

    /// URL of the player's emblem image.
    ///
    /// `size` should be one of 95, 128, 190, 256 or 512; the API answers 400
    /// otherwise. Returns `None` if the API did not redirect.
    pub async fn get_emblem_image(
        &self,
        player: &str,
        size: Option<u32>,
    ) -> Result<Option<String>, Error> {
        let mut query = QueryParams::new();
        query.push_opt("size", size);
        self.profile_request(&[player, "emblem"], &query).await
    }

    /// URL of the player's spartan image.
    ///
    /// `crop` is "full" (the API default) or "portrait".
    pub async fn get_spartan_image(
        &self,
        player: &str,
        size: Option<u32>,
        crop: Option<&str>,
    ) -> Result<Option<String>, Error> {
        let mut query = QueryParams::new();
        query.push_opt("size", size).push_opt("crop", crop);
        self.profile_request(&[player, "spartan"], &query).await
    }

    // stats

    /// Completed matches the player took part in, most recent first.
    pub async fn get_player_matches(
        &self,
        player: &str,
        filter: &MatchHistoryQuery,
    ) -> Result<Value, Error> {
        self.stats_request(&["players", player, "matches"], &filter.to_query())
            .await
    }

    /// Detailed statistics for a single match.
    pub async fn get_match(&self, mode: GameMode, match_id: &str) -> Result<Value, Error> {
        self.stats_request(&[mode.as_str(), "matches", match_id], &QueryParams::new())
            .await
    }

    pub async fn get_arena_match(&self, match_id: &str) -> Result<Value, Error> {
        self.get_match(GameMode::Arena, match_id).await
    }

    pub async fn get_campaign_match(&self, match_id: &str) -> Result<Value, Error> {
        self.get_match(GameMode::Campaign, match_id).await
    }

    pub async fn get_custom_match(&self, match_id: &str) -> Result<Value, Error> {
        self.get_match(GameMode::Custom, match_id).await
    }

    pub async fn get_warzone_match(&self, match_id: &str) -> Result<Value, Error> {
        self.get_match(GameMode::Warzone, match_id).await
    }

    /// Lifetime statistics of each player in `mode`. Players are sent as a
    /// repeated `players` parameter in the given order.
    pub async fn get_service_records<S: AsRef<str>>(
        &self,
        mode: GameMode,
        players: &[S],
    ) -> Result<Value, Error> {
        let mut query = QueryParams::new();
        query.push_all("players", players.iter().map(|p| p.as_ref()));
        self.stats_request(&["servicerecords", mode.as_str()], &query).await
    }

    pub async fn get_arena_service_records<S: AsRef<str>>(
        &self,
        players: &[S],
    ) -> Result<Value, Error> {
        self.get_service_records(GameMode::Arena, players).await
    }

    pub async fn get_campaign_service_records<S: AsRef<str>>(
        &self,
        players: &[S],
    ) -> Result<Value, Error> {
        self.get_service_records(GameMode::Campaign, players).await
    }

    pub async fn get_custom_service_records<S: AsRef<str>>(
        &self,
        players: &[S],
    ) -> Result<Value, Error> {
        self.get_service_records(GameMode::Custom, players).await
    }

    pub async fn get_warzone_service_records<S: AsRef<str>>(
        &self,
        players: &[S],
    ) -> Result<Value, Error> {
        self.get_service_records(GameMode::Warzone, players).await
    }
}
