//! Relwatch CLI - Watch a folder for new release documents and parse them.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use relwatch_ingest::{DocumentParser, FolderWatcher, LogSink, Segmenter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Watch a folder for new release documents and parse them into change entries.
#[derive(Parser)]
#[command(name = "relwatch")]
#[command(version)]
#[command(about = "Watch a folder for new release documents and parse them", long_about = None)]
struct Cli {
    /// Folder path to watch
    folder: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let parser = DocumentParser::new(Segmenter::with_defaults());
    info!(
        "Sentence segmentation mode: {:?}",
        parser.segmenter().mode()
    );

    let mut watcher = FolderWatcher::new(parser, Arc::new(LogSink));

    watcher
        .start(&cli.folder)
        .with_context(|| format!("Could not watch folder {}", cli.folder.display()))?;

    println!(
        "{} {}",
        "Watching folder:".cyan(),
        cli.folder.display()
    );
    println!("Press Ctrl+C to stop.\n");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Interrupt received, stopping watcher");
    watcher.stop();

    println!("{}", "Watcher stopped.".cyan());

    Ok(())
}
