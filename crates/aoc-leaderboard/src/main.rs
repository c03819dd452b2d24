mod bootstrap;
mod report;

use anyhow::{Context, Result};
use leaderboard_core::settings::{OutputFormat, Settings};
use leaderboard_data::analysis::{analyze_snapshot, AnalysisOptions};
use leaderboard_data::parser::parse_file;

use crate::report::TextReport;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("aoc-leaderboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Snapshot: {}, timezone: {}, sort: {:?}",
        settings.snapshot.display(),
        settings.timezone,
        settings.sort
    );

    let resolver = settings.resolver()?;
    let options = AnalysisOptions::from_settings(&settings)?;

    let leaderboard = parse_file(&settings.snapshot)
        .with_context(|| format!("loading {}", settings.snapshot.display()))?;

    let report = analyze_snapshot(&leaderboard, &options, &resolver);

    match settings.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", TextReport(&report)),
    }

    Ok(())
}
