//! Terminal front end: resolve a location, fetch once, print the dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skycast_core::Config;
use skycast_weather::{
    Coordinates, Dashboard, DashboardState, FixedPosition, LocationIdentifier, LocationResolver,
    NoPositioning, PositionSource, PostcodeLookup, WeatherProvider,
};

#[derive(Parser)]
#[command(name = "skycast")]
#[command(about = "Current conditions and a 5-day forecast for a UK postcode")]
#[command(version)]
struct Cli {
    /// UK postcode to show (defaults to the configured location)
    #[arg(short, long, conflicts_with = "here")]
    postcode: Option<String>,

    /// Use the device position, looked up to its nearest postcode
    #[arg(long)]
    here: bool,

    /// Latitude for --here (overrides the configured position)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for --here (overrides the configured position)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn position_source(cli: &Cli, config: &Config) -> Box<dyn PositionSource> {
    match (cli.lat, cli.lon, config.position) {
        (Some(lat), Some(lon), _) => Box::new(FixedPosition(Coordinates::new(lat, lon))),
        (_, _, Some(pos)) => Box::new(FixedPosition::from(pos)),
        _ => Box::new(NoPositioning),
    }
}

fn render(state: &DashboardState) {
    let Some(view) = state.view() else {
        println!("No forecast available for {}", state.location());
        return;
    };

    println!("{}", view.location_label);
    println!(
        "{}  {}  (background {})",
        view.display_temp,
        view.current.condition_text,
        state.background().colour()
    );
    println!("Wind: {} mph", view.current.wind_mph);
    println!("Icon: {}", view.current.condition_icon_url);
    println!();
    for day in &view.forecast {
        println!(
            "{:<4}{:>5}  {}",
            day.weekday_label(),
            day.display_temp(),
            day.condition_text
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    skycast_core::init(if cli.verbose { "debug" } else { "info" })?;

    let (config, _warnings) = Config::load_validated(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let lookup = PostcodeLookup::from_config(&config.geocode)?;
    let provider = WeatherProvider::from_config(&config.weather)?;
    let resolver = LocationResolver::new(lookup, position_source(&cli, &config));
    let dashboard = Dashboard::new(
        LocationIdentifier::new(config.weather.default_location.clone()),
        resolver,
        provider,
    );

    let notice = if cli.here {
        dashboard.use_device_location().await
    } else if let Some(raw) = &cli.postcode {
        dashboard.begin_edit();
        dashboard.submit_postcode(raw).await
    } else {
        dashboard.start().await;
        None
    };

    if let Some(notice) = notice {
        eprintln!("{}", notice.message);
        tracing::debug!("Notice raised by: {}", notice.error);
    }

    let state = dashboard.snapshot();
    tracing::info!("Skycast finished for {}", state.location());
    render(&state);

    Ok(())
}
