//! Archive Validator CLI
//!
//! Validates an LBW archive against its schema and prints summary statistics.

use std::path::PathBuf;

use clap::Parser;
use lbw_archive::{
    build_report, render_error, render_json, render_text, LbwConfig, OutputFormat, Result,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lbw-validate")]
#[command(about = "Validate an LBW archive and summarize it")]
struct Cli {
    /// Archive document to check (defaults to paths.data from config)
    data: Option<PathBuf>,

    /// JSON Schema to validate against
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Config file layered over the default locations
    #[arg(short, long)]
    config: Option<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
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
    let schema = cli.schema.unwrap_or(config.paths.schema);
    let format = cli.format.unwrap_or(config.report.format);

    let report = build_report(&data, &schema)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report.metrics)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}
