use std::fs;
use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_diagram::config::Config;
use trip_diagram::diagram::Diagram;
use trip_diagram::otp::PlanResponse;
use trip_diagram::state::order_itineraries;

/// Environment variable naming an optional configuration file.
const CONFIG_ENV: &str = "TRIP_DIAGRAM_CONFIG";

const USAGE: &str = "usage: trip-diagram <plan.json> [itinerary-index]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the diagram on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let plan_path = args.next().ok_or(USAGE)?;
    let index: usize = match args.next() {
        Some(arg) => arg.parse().map_err(|_| format!("invalid itinerary index: {arg}"))?,
        None => 0,
    };

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(%path, "Loading configuration");
            Config::load(&path)?
        }
        Err(_) => Config::default(),
    };

    let response: PlanResponse = serde_json::from_str(&fs::read_to_string(&plan_path)?)?;
    let Some(plan) = response.plan else {
        let msg = response
            .error
            .and_then(|e| e.msg)
            .unwrap_or_else(|| "response has no plan".to_string());
        return Err(format!("{plan_path}: {msg}").into());
    };

    let itineraries = order_itineraries(&plan.itineraries, &config.plan);
    info!(available = itineraries.len(), index, "Building diagram");
    let itinerary = itineraries.get(index).ok_or_else(|| {
        format!(
            "itinerary {index} out of range ({} available)",
            itineraries.len()
        )
    })?;

    let diagram = Diagram::from_dto(itinerary, &config.map)?;
    serde_json::to_writer_pretty(io::stdout().lock(), &diagram)?;
    println!();
    Ok(())
}
