use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing_subscriber::EnvFilter;

use gpx_summary::{process, write_report};

/// Prints GPX track summaries, sorted by track start time.
#[derive(Parser, Debug)]
#[command(author, version, about = "Prints GPX track summaries", long_about = None)]
struct Cli {
    /// GPX files to summarize
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    /// Show data as table
    #[arg(short = 't', long = "table", action = ArgAction::SetTrue)]
    table: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut tracks = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let info = process(path)
            .with_context(|| format!("failed to summarize {}", path.display()))?;
        tracks.push(info);
    }

    write_report(tracks, cli.table, &mut io::stdout().lock())?;

    Ok(())
}
