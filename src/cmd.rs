use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

use haloapi::{GameMode, HaloApi, HaloApiBuilder, MatchHistoryQuery, MetadataEndpoint};

#[derive(Parser, Debug)]
#[command(name = "haloapi", about = "Query the Halo 5 API", long_about = None)]
pub struct Args {
    /// API host to talk to instead of www.haloapi.com
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Args {
    /// Reads the API key from the environment and applies the overrides.
    pub fn api(&self) -> anyhow::Result<HaloApi> {
        let mut builder = HaloApiBuilder::from_env()?;
        if let Some(ref base_url) = self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Argument-less metadata list
    Metadata {
        #[arg(value_enum)]
        endpoint: MetadataEndpoint,
    },
    GameVariant {
        id: String,
    },
    MapVariant {
        id: String,
    },
    RequisitionPack {
        id: String,
    },
    Requisition {
        id: String,
    },
    /// Prints the URL of a player's emblem image
    Emblem {
        player: String,

        /// One of 95, 128, 190, 256, 512
        #[arg(long)]
        size: Option<u32>,
    },
    /// Prints the URL of a player's spartan image
    Spartan {
        player: String,

        /// One of 95, 128, 190, 256, 512
        #[arg(long)]
        size: Option<u32>,

        /// full or portrait
        #[arg(long)]
        crop: Option<String>,
    },
    /// Recent matches of a player
    Matches {
        player: String,

        #[arg(long, value_enum, value_delimiter = ',')]
        modes: Vec<GameMode>,

        #[arg(long)]
        start: Option<u32>,

        #[arg(long)]
        count: Option<u32>,
    },
    Match {
        #[arg(value_enum)]
        mode: GameMode,
        id: String,
    },
    ServiceRecords {
        #[arg(value_enum)]
        mode: GameMode,

        #[arg(required = true)]
        players: Vec<String>,
    },
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_image(url: Option<String>) {
    match url {
        Some(url) => println!("{url}"),
        None => eprintln!("no image location returned"),
    }
}

impl Cmd {
    pub async fn run(self, api: &HaloApi) -> anyhow::Result<()> {
        match self {
            Cmd::Metadata { endpoint } => print_json(&api.metadata(endpoint).await?)?,
            Cmd::GameVariant { id } => print_json(&api.get_game_variant(&id).await?)?,
            Cmd::MapVariant { id } => print_json(&api.get_map_variant(&id).await?)?,
            Cmd::RequisitionPack { id } => print_json(&api.get_requisition_pack(&id).await?)?,
            Cmd::Requisition { id } => print_json(&api.get_requisition(&id).await?)?,
            Cmd::Emblem { player, size } => {
                print_image(api.get_emblem_image(&player, size).await?);
            }
            Cmd::Spartan { player, size, crop } => {
                print_image(
                    api.get_spartan_image(&player, size, crop.as_deref())
                        .await?,
                );
            }
            Cmd::Matches {
                player,
                modes,
                start,
                count,
            } => {
                let filter = MatchHistoryQuery {
                    modes,
                    start,
                    count,
                };
                print_json(&api.get_player_matches(&player, &filter).await?)?;
            }
            Cmd::Match { mode, id } => print_json(&api.get_match(mode, &id).await?)?,
            Cmd::ServiceRecords { mode, players } => {
                print_json(&api.get_service_records(mode, &players).await?)?;
            }
        }

        Ok(())
    }
}
