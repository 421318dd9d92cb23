//! Cololite map inspector: builds a map and prints its JSON snapshot.

use cololite_core::Map;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(radius = config.radius, seed = ?config.seed, "Building map...");

    let map = match config.seed {
        Some(seed) => Map::build_map_of_size_with_rng(config.radius, &mut StdRng::seed_from_u64(seed)),
        None => Map::build_map_of_size(config.radius),
    };
    info!(
        hexes = map.get_hexes().len(),
        corners = map.get_corners().len(),
        edges = map.get_edges().len(),
        "Map built"
    );

    let snapshot = map.to_json_friendly();
    let json = if config.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", json);
    Ok(())
}
