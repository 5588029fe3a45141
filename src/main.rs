use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use fixture_predictor::config::PredictorConfig;
use fixture_predictor::fixture::load_fixture;
use fixture_predictor::report;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cfg = PredictorConfig::from_env();
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/fixture_case.json"));

    let case = load_fixture(&path)?;
    let outcome = case.run(&cfg)?;

    print!("{}", report::render_prediction(&outcome.prediction));
    println!();
    println!("Trace:");
    print!("{}", report::render_trace(&outcome.prediction.trace));

    if let Some(market) = &outcome.market {
        println!();
        println!("Market comparison:");
        print!("{}", report::render_market_summary(market));
        print!("{}", report::render_value_table(&outcome.value, cfg.value_only));
    }

    Ok(())
}
