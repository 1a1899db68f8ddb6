//! Setup Scorer - batch evaluation of setup candidates
//!
//! Reads flag bundles as JSON Lines from a file or stdin:
//! 1. Scores each bundle
//! 2. Maps the score to a tier
//! 3. Gates the tier against the configured minimum
//! 4. Writes one JSON evaluation per line to stdout

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::{info, warn};

use setup_scorer::{run_batch, ScorerConfig};

fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = ScorerConfig::parse();

    // Logs go to stderr; stdout carries evaluations only
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    info!("Starting Setup Scorer (min tier: {})", config.min_tier);
    if !config.min_tier_recognized() {
        warn!(
            "Unrecognized min tier {:?}, gate will apply the A policy",
            config.min_tier
        );
    }

    let stdout = io::stdout();
    let summary = match &config.input {
        Some(path) => {
            info!("Reading setups from {}", path.display());
            let file = File::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;
            run_batch(
                BufReader::new(file),
                stdout.lock(),
                &config.min_tier,
                config.admitted_only,
            )?
        }
        None => run_batch(
            io::stdin().lock(),
            stdout.lock(),
            &config.min_tier,
            config.admitted_only,
        )?,
    };

    info!(
        "✓ Done: {} evaluated, {} admitted, {} skipped",
        summary.evaluated, summary.admitted, summary.skipped
    );

    Ok(())
}
