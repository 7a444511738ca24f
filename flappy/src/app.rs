//! # Flappy Application Logic
//!
//! Builds the population, drives one generation through
//! [`GenerationEvaluator::run`] and turns the fitness cells into a
//! [`Summary`].
//!
//! The observer handed to the evaluator is where the runtime concerns live:
//! the tick cap, the quit flag set by Ctrl-C, the optional JSON-lines frame
//! dump and real-time pacing. Each of them can end the generation early by
//! breaking out of the loop at a tick boundary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use generation::{Frame, GenerationConfig, GenerationEvaluator, Outcome};
use ml::FeedForward;

use crate::cli::Args;

/// How a generation went, from the optimizer's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub outcome: Outcome,
    pub fitness: Vec<f64>,
    pub best: Option<usize>,
}

impl Summary {
    #[must_use]
    pub fn new(outcome: Outcome, fitness: Vec<f64>) -> Self {
        let best = fitness
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        Self { outcome, fitness, best }
    }

    #[must_use]
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.map(|i| self.fitness[i])
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.0;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

/// Sleeps just long enough to hold a fixed tick rate.
pub struct Pacer {
    period: Duration,
    next: Instant,
}

impl Pacer {
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick is due. A tick that ran late does not make
    /// the following ones run faster.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

/// Load the config named on the command line, or the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    match path {
        Some(path) => GenerationConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GenerationConfig::default()),
    }
}

/// Random networks for one generation.
#[must_use]
pub fn spawn_population(size: usize, widths: &[usize], rng: &mut fastrand::Rng) -> Vec<FeedForward> {
    (0..size).map(|_| FeedForward::random(widths, rng)).collect()
}

/// Evaluate one generation as described by `args`.
///
/// `quit` is polled after every tick; setting it stops the generation at
/// that tick boundary.
///
/// # Errors
///
/// Returns any configuration, policy or I/O error. Frames already written
/// stay on disk.
pub fn run(args: &Args, quit: &AtomicBool) -> Result<Summary> {
    let config = load_config(args.config.as_deref())?;
    let ticks_per_second = config.ticks_per_second;

    let mut rng = args.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut policies = spawn_population(args.population, &args.layer_widths(), &mut rng);
    let mut fitness = vec![0.0_f64; policies.len()];

    let mut frames = args
        .frames
        .as_deref()
        .map(|path| {
            File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("failed to create frame log {}", path.display()))
        })
        .transpose()?;

    tracing::info!(
        population = args.population,
        seed = ?args.seed,
        headless = args.headless,
        "starting generation"
    );

    let outcome = {
        let mut evaluator = GenerationEvaluator::new(config, &mut policies, &mut fitness)?
            .with_rng(fastrand::Rng::with_seed(rng.u64(..)));
        let mut pacer = (!args.headless).then(|| Pacer::new(ticks_per_second));
        let mut write_error = None;

        let outcome = evaluator.run(|frame| {
            if let Some(out) = frames.as_mut() {
                if let Err(e) = write_frame(out, frame) {
                    write_error = Some(e);
                    return ControlFlow::Break(());
                }
            }
            if frame.tick % 100 == 0 {
                tracing::info!(tick = frame.tick, alive = frame.alive, score = frame.score, "progress");
            }
            if quit.load(Ordering::SeqCst) {
                return ControlFlow::Break(());
            }
            if args.max_ticks.is_some_and(|cap| frame.tick >= cap) {
                tracing::info!(tick = frame.tick, "tick cap reached");
                return ControlFlow::Break(());
            }
            if let Some(pacer) = pacer.as_mut() {
                pacer.wait();
            }
            ControlFlow::Continue(())
        })?;

        if let Some(e) = write_error {
            return Err(e);
        }
        outcome
    };

    if let Some(mut out) = frames {
        out.flush().context("failed to flush frame log")?;
    }

    let summary = Summary::new(outcome, fitness);
    if let (Some(path), Some(best)) = (args.save_best.as_deref(), summary.best) {
        save_network(path, &policies[best])?;
        tracing::info!(index = best, path = %path.display(), "saved best network");
    }
    Ok(summary)
}

fn write_frame(out: &mut impl Write, frame: &Frame) -> Result<()> {
    serde_json::to_writer(&mut *out, frame).context("failed to encode frame")?;
    out.write_all(b"\n").context("failed to write frame")?;
    Ok(())
}

fn save_network(path: &Path, network: &FeedForward) -> Result<()> {
    let json = serde_json::to_string_pretty(network)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
