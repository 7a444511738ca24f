//! # Flappy Runtime
//!
//! Entry point for the `flappy` binary: parse the command line, set up
//! logging and the Ctrl-C handler, evaluate one generation and print the
//! fitness of every network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use flappy::{app, cli::Args};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit = Arc::clone(&quit);
        ctrlc::set_handler(move || quit.store(true, Ordering::SeqCst))
            .context("failed to install Ctrl-C handler")?;
    }

    let summary = app::run(&args, &quit)?;

    tracing::info!(
        ticks = summary.outcome.ticks,
        score = summary.outcome.score,
        completed = summary.outcome.completed,
        best = ?summary.best_fitness(),
        mean = summary.mean_fitness(),
        "generation summary"
    );
    for (index, fitness) in summary.fitness.iter().enumerate() {
        println!("{index}\t{fitness:.2}");
    }
    Ok(())
}
