//! Replay entry point.
//!
//! ```text
//! farming-replay <recording.jsonl> [config.yaml]
//! ```
//!
//! Without an explicit config path, `farming-config.yaml` in the working
//! directory is used if present, otherwise built-in defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::info;

use farming_replay::{Replayer, logging};
use farming_stats::FarmingConfig;

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_PATH: &str = "farming-config.yaml";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args_os().skip(1);
    let Some(recording) = args.next().map(PathBuf::from) else {
        bail!("usage: farming-replay <recording.jsonl> [config.yaml]");
    };
    let config = load_config(args.next().map(PathBuf::from))?;

    logging::init(&config.logging);
    info!(recording = %recording.display(), "farming-replay starting");

    let file = File::open(&recording)
        .with_context(|| format!("failed to open recording {}", recording.display()))?;
    let mut replayer = Replayer::new();
    replayer
        .replay(BufReader::new(file))
        .with_context(|| format!("failed to replay {}", recording.display()))?;

    let report = replayer.report(config.output.include_summary);
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    Ok(())
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<FarmingConfig> {
    match explicit {
        Some(path) => FarmingConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            FarmingConfig::from_file(Path::new(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("failed to load config {DEFAULT_CONFIG_PATH}"))
        }
        None => FarmingConfig::parse("").context("failed to build default config"),
    }
}
