//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "flappy", about = "Evaluate one generation of the obstacle course")]
pub struct Args {
    /// Number of networks in the generation.
    #[arg(long, default_value_t = 50)]
    pub population: usize,

    /// Hidden layer width. Zero connects inputs straight to the output.
    #[arg(long, default_value_t = 0)]
    pub hidden: usize,

    /// Seed for network weights and the obstacle course.
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON generation config. Missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop after this many ticks even if agents are still alive.
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Step as fast as possible instead of at the configured tick rate.
    #[arg(long)]
    pub headless: bool,

    /// Write every frame as one JSON line to this file.
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Save the fittest network as JSON.
    #[arg(long)]
    pub save_best: Option<PathBuf>,
}

impl Args {
    /// Layer widths for the three-input, one-output policy network.
    #[must_use]
    pub fn layer_widths(&self) -> Vec<usize> {
        if self.hidden == 0 {
            vec![3, 1]
        } else {
            vec![3, self.hidden, 1]
        }
    }
}
