use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{polyline::PolylineArgs, route::RouteArgs};

mod parsers;
mod polyline;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about = "Find a route and draw it on a map", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the directions API for a route and write the map
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Decode an encoded polyline into [lat, lng] pairs
    Decode {
        #[command(flatten)]
        args: PolylineArgs,
    },
    /// Encode a JSON array of [lat, lng] pairs into a polyline
    Encode {
        #[command(flatten)]
        args: PolylineArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route { args } => route::run(args).await?,
        Commands::Decode { args } => polyline::decode(args)?,
        Commands::Encode { args } => polyline::encode(args)?,
    }

    Ok(())
}
