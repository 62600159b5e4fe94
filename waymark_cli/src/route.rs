use std::{path::PathBuf, time::Duration};

use anyhow::bail;
use clap::Args;
use comfy_table::Table;
use indicatif::ProgressBar;
use tracing::{info, warn};
use waymark_core::{
    error::RouteError,
    route_query::{PreferredHour, RouteQuery, TravelMode},
    route_result::RouteResult,
};
use waymark_google::directions_client::{DirectionsClient, DirectionsError};
use waymark_map::{
    html::{MapPage, PAGE_TITLE, TileLayer},
    route_map::RouteMap,
    statistics::trip_statistics,
};

use crate::parsers;

#[derive(Args)]
pub struct RouteArgs {
    /// Your name, shown on the map page
    #[arg(short, long, default_value = "John Doe")]
    name: String,

    /// Starting point
    #[arg(short, long, default_value = "New York, NY")]
    origin: String,

    /// Destination
    #[arg(short = 't', long, default_value = "Boston, MA")]
    destination: String,

    /// Mode of transport: driving, walking, bicycling or transit
    #[arg(short, long, default_value = "driving", value_parser = parsers::parse_mode)]
    mode: TravelMode,

    #[arg(long)]
    avoid_tolls: bool,

    /// Estimate with the best-guess traffic model instead of the pessimistic one
    #[arg(short, long)]
    fastest: bool,

    /// Preferred departure hour (0-23), sent as the next occurrence of that hour
    #[arg(long, value_parser = parsers::parse_hour)]
    hour: Option<PreferredHour>,

    /// Where to write the HTML map
    #[arg(long, default_value = "route.html")]
    output: PathBuf,

    /// Also write the route as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let departure = args
        .hour
        .map(|hour| hour.next_departure(&jiff::Zoned::now()))
        .transpose()?;

    let query = RouteQuery::builder(&args.origin, &args.destination)
        .mode(args.mode)
        .avoid_tolls(args.avoid_tolls)
        .fastest_route(args.fastest)
        .departure(departure)
        .build()?;

    info!("Planning a route for {}", args.name);
    if let Some(hour) = args.hour {
        info!("Preferred time: {}", hour);
    }

    let client = DirectionsClient::from_env()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Fetching route and traffic details...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.fetch_route(&query).await;
    spinner.finish_and_clear();

    let route = match result {
        Ok(route) => route,
        Err(DirectionsError::Route(error)) => fail(error)?,
        Err(error) => return Err(error.into()),
    };

    let map = match RouteMap::from_route(&route) {
        Ok(map) => map,
        Err(error) => fail(error)?,
    };

    println!("{}", statistics_table(&route, &map));

    let mut page = MapPage::new(PAGE_TITLE)
        .with_heading(format!("Hello, {}!", args.name))
        .with_tiles(TileLayer::from_env());
    for (label, value) in trip_statistics(&route, &map) {
        page = page.with_statistic(label, value);
    }
    if let Some(hour) = args.hour {
        page = page.with_statistic("Preferred time", hour.to_string());
    }

    std::fs::write(&args.output, map.to_html(&page)?)?;
    info!("Map written to {}", args.output.display());

    if let Some(path) = &args.geojson {
        std::fs::write(path, map.to_geojson().to_string())?;
        info!("GeoJSON written to {}", path.display());
    }

    Ok(())
}

fn fail<T>(error: RouteError) -> anyhow::Result<T> {
    warn!("{}", error);
    bail!(error.user_message())
}

fn statistics_table(route: &RouteResult, map: &RouteMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Route Details", ""]);

    for (label, value) in trip_statistics(route, map) {
        table.add_row(vec![label, value]);
    }

    table
}
