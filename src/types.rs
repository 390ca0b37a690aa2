use std::fmt;

use serde::Serialize;

pub const TITLE: &str = "h5";

/// Top-level section of the API a request goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Metadata,
    Profile,
    Stats,
}

impl Category {
    /// Path segments under the base address, title included.
    pub fn segments<'a>(&self, title: &'a str) -> Vec<&'a str> {
        match self {
            Category::Metadata => vec!["metadata", title, "metadata"],
            Category::Profile => vec!["profile", title, "profiles"],
            Category::Stats => vec!["stats", title],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum GameMode {
    Arena,
    Campaign,
    Custom,
    Warzone,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Arena => "arena",
            GameMode::Campaign => "campaign",
            GameMode::Custom => "custom",
            GameMode::Warzone => "warzone",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata endpoints that take no arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MetadataEndpoint {
    CampaignMissions,
    Commendations,
    CsrDesignations,
    Enemies,
    FlexibleStats,
    GameBaseVariants,
    Impulses,
    Maps,
    Medals,
    Playlists,
    Skulls,
    SpartanRanks,
    TeamColors,
    Vehicles,
    Weapons,
}

impl MetadataEndpoint {
    pub const ALL: [MetadataEndpoint; 15] = [
        MetadataEndpoint::CampaignMissions,
        MetadataEndpoint::Commendations,
        MetadataEndpoint::CsrDesignations,
        MetadataEndpoint::Enemies,
        MetadataEndpoint::FlexibleStats,
        MetadataEndpoint::GameBaseVariants,
        MetadataEndpoint::Impulses,
        MetadataEndpoint::Maps,
        MetadataEndpoint::Medals,
        MetadataEndpoint::Playlists,
        MetadataEndpoint::Skulls,
        MetadataEndpoint::SpartanRanks,
        MetadataEndpoint::TeamColors,
        MetadataEndpoint::Vehicles,
        MetadataEndpoint::Weapons,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            MetadataEndpoint::CampaignMissions => "campaign-missions",
            MetadataEndpoint::Commendations => "commendations",
            MetadataEndpoint::CsrDesignations => "csr-designations",
            MetadataEndpoint::Enemies => "enemies",
            MetadataEndpoint::FlexibleStats => "flexible-stats",
            MetadataEndpoint::GameBaseVariants => "game-base-variants",
            MetadataEndpoint::Impulses => "impulses",
            MetadataEndpoint::Maps => "maps",
            MetadataEndpoint::Medals => "medals",
            MetadataEndpoint::Playlists => "playlists",
            MetadataEndpoint::Skulls => "skulls",
            MetadataEndpoint::SpartanRanks => "spartan-ranks",
            MetadataEndpoint::TeamColors => "team-colors",
            MetadataEndpoint::Vehicles => "vehicles",
            MetadataEndpoint::Weapons => "weapons",
        }
    }
}

/// Ordered query string pairs. Repeated names are kept as separate pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl ToString) -> &mut Self {
        self.0.push((name, value.to_string()));
        self
    }

    /// Adds the pair only when a value is present.
    pub fn push_opt<T: ToString>(&mut self, name: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    pub fn push_all<I>(&mut self, name: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self.push(name, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Filters for a player's match history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchHistoryQuery {
    pub modes: Vec<GameMode>,
    pub start: Option<u32>,
    pub count: Option<u32>,
}

impl MatchHistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modes(mut self, modes: impl IntoIterator<Item = GameMode>) -> Self {
        self.modes = modes.into_iter().collect();
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let modes = (!self.modes.is_empty()).then(|| {
            self.modes
                .iter()
                .map(GameMode::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });

        let mut query = QueryParams::new();
        query
            .push_opt("modes", modes)
            .push_opt("start", self.start)
            .push_opt("count", self.count);
        query
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_category_roots() {
        assert_eq!(
            Category::Metadata.segments(TITLE),
            vec!["metadata", "h5", "metadata"]
        );
        assert_eq!(
            Category::Profile.segments(TITLE),
            vec!["profile", "h5", "profiles"]
        );
        assert_eq!(Category::Stats.segments(TITLE), vec!["stats", "h5"]);
    }

    #[test]
    fn test_empty_match_history_query_sends_nothing() {
        assert!(MatchHistoryQuery::new().to_query().is_empty());
    }

    #[test]
    fn test_match_history_query_joins_modes() {
        let query = MatchHistoryQuery::new()
            .modes([GameMode::Arena, GameMode::Warzone])
            .count(5)
            .to_query();

        assert_eq!(
            query.pairs(),
            &[("modes", "arena,warzone".to_string()), ("count", "5".to_string())]
        );
    }

    #[test]
    fn test_push_all_keeps_order() {
        let mut query = QueryParams::new();
        query.push_all("players", ["b", "a", "b"]);

        assert_eq!(
            query.pairs(),
            &[
                ("players", "b".to_string()),
                ("players", "a".to_string()),
                ("players", "b".to_string())
            ]
        );
    }

    #[test]
    fn test_metadata_paths_are_distinct() {
        let mut paths: Vec<_> = MetadataEndpoint::ALL.iter().map(|e| e.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), MetadataEndpoint::ALL.len());
    }
}
