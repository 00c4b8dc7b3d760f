#[macro_use]
extern crate log;

use ada_gallery::{config, rest::api::AssetNameResponse, rest::server::run_server, service};
use clap::Parser;

/// Cardano wallet balance and NFT gallery
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// path to config file
    #[arg(short, long, default_value_t = String::from("config.toml"))]
    config: String,

    #[command(subcommand)]
    subcommand: Option<Subcommand>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.subcommand {
        None => run_app(&args.config).await,
        Some(subcmd) => subcmd.run(&args.config).await,
    }
}

#[derive(Debug, Parser)]
enum Subcommand {
    #[command(about = "Start the gallery server (default)")]
    Server,

    #[command(about = "Fetch the wallet overview and print it as JSON")]
    Overview,

    #[command(about = "Decode the display name of an asset unit without network access")]
    DecodeAsset {
        /// policy id followed by the hex asset name
        unit: String,
    },
}

impl Subcommand {
    async fn run(&self, cfg_path: &str) -> anyhow::Result<()> {
        match self {
            Subcommand::Server => run_app(cfg_path).await,
            Subcommand::Overview => print_overview(cfg_path).await,
            Subcommand::DecodeAsset { unit } => {
                let decoded = AssetNameResponse::decode(unit);
                println!("{}", serde_json::to_string_pretty(&decoded)?);
                Ok(())
            }
        }
    }
}

async fn run_app(cfg_path: &str) -> anyhow::Result<()> {
    let cfg = config::read_config(cfg_path).await?;
    let wallet = service::WalletService::new(&cfg.blockfrost);

    if let Err(err) = run_server(cfg.api, wallet).await {
        error!("HTTP server failed: {:?}", err);
        return Err(err.into());
    }

    info!("Application successfully shut down");
    Ok(())
}

async fn print_overview(cfg_path: &str) -> anyhow::Result<()> {
    let cfg = config::read_config(cfg_path).await?;
    let wallet = service::WalletService::new(&cfg.blockfrost);

    let overview = wallet.fetch_overview().await?;
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}
