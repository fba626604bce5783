use clap::Parser;
use lumina_stage::api::dispatch_json_report;
use lumina_stage::{Dispatcher, InMemoryStage, StageConfig};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replays a JSON-lines command log against an in-memory stage and prints
/// the resulting element state.
#[derive(Parser, Debug)]
#[command(name = "lumina-replay", version)]
struct Args {
    /// Stage configuration (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command log, one JSON command per line; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Prop element to place on the stage; may be repeated
    #[arg(long = "prop")]
    props: Vec<String>,

    /// Apply the configured initial expression and mouth before replaying
    #[arg(long)]
    initialize: bool,

    /// Fire pending animation ends after every command
    #[arg(long)]
    complete_animations: bool,

    /// Stop at the first failed command
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StageConfig::from_file(path)?,
        None => StageConfig::default(),
    };

    let mut stage = InMemoryStage::from_config(&config);
    for prop in &args.props {
        stage.insert_element(prop.as_str());
    }

    let mut dispatcher = Dispatcher::new(stage, config);
    if args.initialize {
        dispatcher.initialize()?;
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut failures = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let report = dispatch_json_report(&mut dispatcher, line);
        println!("{}", serde_json::to_string(&report)?);

        if report.is_failure() {
            failures += 1;
            if args.fail_fast {
                let detail = report.detail.unwrap_or_default();
                return Err(format!("line {}: {}", index + 1, detail).into());
            }
        }

        if args.complete_animations {
            dispatcher.view_mut().complete_all_animations();
        }
    }

    println!("{}", serde_json::to_string_pretty(&dispatcher.view().snapshot())?);

    if failures > 0 {
        tracing::warn!("{} command(s) failed", failures);
    }
    Ok(())
}
