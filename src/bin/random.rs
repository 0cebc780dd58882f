//! Random Clip CLI
//!
//! Picks a random delivery or review clip from the archive and prints it with
//! a timestamped link.

use std::path::PathBuf;

use clap::Parser;
use lbw_archive::{
    load_json, render_error, select_random, Dataset, DocumentRole, LbwConfig, OutputFormat, Result,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lbw-random")]
#[command(about = "Serve a random LBW clip from the archive")]
struct Cli {
    /// Archive document (defaults to paths.data from config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Seed for a reproducible pick
    #[arg(long)]
    seed: Option<u64>,

    /// Config file layered over the default locations
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        println!("{}", render_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = LbwConfig::load_from(cli.config.as_deref())?;

    let data = cli.data.unwrap_or(config.paths.data);
    let format = cli.format.unwrap_or(config.selection.format);
    let seed = cli.seed.or(config.selection.seed);

    let document = load_json(&data, DocumentRole::Data)?;
    let selection = select_random(&Dataset::from_value(&document), seed)?;

    match format {
        OutputFormat::Json => println!("{}", selection.to_json()?),
        OutputFormat::Text => print!("{}", selection.to_text()),
    }
    Ok(())
}
