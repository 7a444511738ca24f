mod common;

use std::ops::ControlFlow;

use common::{assert_close, hollow_pipes, hover, never, population};
use generation::{GenerationConfig, GenerationEvaluator};
use ml::{Observation, Policy, PolicyError};
use physics::ObstaclePair;

fn hovering_course<'g>(
    policies: &'g mut [ml::FnPolicy<common::Decide>],
    fitness: &'g mut [f64],
) -> GenerationEvaluator<'g, ml::FnPolicy<common::Decide>, f64> {
    GenerationEvaluator::new(GenerationConfig::default(), policies, fitness)
        .unwrap()
        .with_rng(fastrand::Rng::with_seed(3))
        .with_silhouettes(hollow_pipes())
}

#[test]
fn hover_policy_stays_in_bounds() {
    let mut policies = population(&[hover]);
    let mut fitness = vec![0.0_f64];
    let mut evaluator = hovering_course(&mut policies, &mut fitness);
    for _ in 0..500 {
        evaluator.step().unwrap();
        let y = evaluator.agents().next().unwrap().y;
        assert!((250.0..500.0).contains(&y), "hover drifted to {y}");
    }
    assert_eq!(evaluator.alive(), 1);
}

#[test]
fn clearing_a_pair_scores_once_and_spawns_the_next() {
    let mut policies = population(&[hover, hover]);
    let mut fitness = vec![0.0_f64; 2];
    let mut evaluator = hovering_course(&mut policies, &mut fitness);

    for _ in 0..114 {
        evaluator.step().unwrap();
    }
    assert_eq!(evaluator.score(), 0);
    assert_eq!(evaluator.obstacles().len(), 1);

    // Trailing edge 125 + 104 = 229 is now behind x = 230.
    evaluator.step().unwrap();
    assert_eq!(evaluator.score(), 1);
    let obstacles = evaluator.obstacles();
    assert_eq!(obstacles.len(), 2);
    assert!(obstacles[0].passed);
    assert_eq!(obstacles[0].x, 125.0);
    assert!(!obstacles[1].passed);
    assert_eq!(obstacles[1].x, 600.0);

    evaluator.step().unwrap();
    assert_eq!(evaluator.score(), 1);
    drop(evaluator);

    // 115 ticks alive, one pass, then one more tick.
    for f in fitness {
        assert_close(f, 0.1 * 116.0 + 5.0);
    }
}

#[test]
fn passed_pairs_retire_once_off_screen() {
    let mut policies = population(&[hover]);
    let mut fitness = vec![0.0_f64];
    let mut evaluator = hovering_course(&mut policies, &mut fitness);

    for _ in 0..160 {
        evaluator.step().unwrap();
    }
    assert_eq!(evaluator.obstacles().len(), 2);
    assert_eq!(evaluator.obstacles()[0].x, -100.0);

    evaluator.step().unwrap();
    assert_eq!(evaluator.obstacles().len(), 1);
    assert_eq!(evaluator.obstacles()[0].x, 600.0 - 5.0 * 46.0);

    while evaluator.tick() < 209 {
        evaluator.step().unwrap();
    }
    assert_eq!(evaluator.score(), 1);
    evaluator.step().unwrap();
    assert_eq!(evaluator.score(), 2);
}

#[test]
fn quit_request_stops_at_a_tick_boundary() {
    let mut policies = population(&[hover]);
    let mut fitness = vec![0.0_f64];
    let mut evaluator = hovering_course(&mut policies, &mut fitness);

    let mut frames = 0;
    let outcome = evaluator
        .run(|frame| {
            frames += 1;
            if frame.tick == 300 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

    assert_eq!(frames, 300);
    assert_eq!(outcome.ticks, 300);
    assert_eq!(outcome.score, 2);
    assert!(!outcome.completed);
    assert_eq!(evaluator.alive(), 1);
}

/// Hovers like [`hover`] and remembers everything it was shown.
#[derive(Default)]
struct Recorder {
    seen: Vec<Observation>,
}

impl Policy for Recorder {
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError> {
        self.seen.push(*observation);
        hover(observation)
    }
}

#[test]
fn observation_switches_to_the_next_pair_once_the_lead_is_past() {
    let mut policies = vec![Recorder::default()];
    let mut fitness = vec![0.0_f64];
    let mut evaluator =
        GenerationEvaluator::new(GenerationConfig::default(), &mut policies, &mut fitness)
            .unwrap()
            .with_silhouettes(hollow_pipes())
            .with_obstacles(vec![
                ObstaclePair::with_gap(300.0, 100.0, 170.0),
                ObstaclePair::with_gap(700.0, 400.0, 170.0),
            ]);
    for _ in 0..60 {
        evaluator.step().unwrap();
    }
    drop(evaluator);

    // Before tick 36 the first pair's trailing edge is still at or ahead of
    // the agent.
    let seen = &policies[0].seen;
    assert_eq!(seen.len(), 60);
    for (tick, obs) in (1..).zip(seen) {
        let gap_top = if tick < 36 { 100.0 } else { 400.0 };
        assert!((obs.to_gap_top - (obs.y - gap_top).abs()).abs() < 1e-3);
        assert!((obs.to_gap_bottom - (obs.y - gap_top - 170.0).abs()).abs() < 1e-3);
    }
}

#[test]
fn hitting_a_pair_costs_the_penalty_and_removes_the_agent() {
    let mut policies = population(&[never]);
    let mut fitness = vec![0.0_f64];
    let mut evaluator =
        GenerationEvaluator::new(GenerationConfig::default(), &mut policies, &mut fitness)
            .unwrap()
            .with_obstacles(vec![ObstaclePair::with_gap(240.0, 100.0, 170.0)]);

    evaluator.step().unwrap();
    assert_eq!(evaluator.alive(), 0);
    drop(evaluator);
    assert_close(fitness[0], 0.1 - 1.0);
}

#[test]
fn overlapping_pairs_penalize_only_once() {
    let mut policies = population(&[never, never]);
    let mut fitness = vec![0.0_f64; 2];
    let mut evaluator =
        GenerationEvaluator::new(GenerationConfig::default(), &mut policies, &mut fitness)
            .unwrap()
            .with_obstacles(vec![
                ObstaclePair::with_gap(240.0, 100.0, 170.0),
                ObstaclePair::with_gap(240.0, 100.0, 170.0),
            ]);

    evaluator.step().unwrap();
    assert_eq!(evaluator.alive(), 0);
    drop(evaluator);
    for f in fitness {
        assert_close(f, -0.9);
    }
}

#[test]
fn long_runs_accumulate_fitness_without_drift() {
    let mut policies = population(&[hover]);
    let mut fitness = vec![0.0_f64];
    let mut evaluator = hovering_course(&mut policies, &mut fitness);
    for _ in 0..100_000 {
        evaluator.step().unwrap();
    }
    assert_eq!(evaluator.alive(), 1);
    let score = evaluator.score();
    assert!(score > 1_000);
    drop(evaluator);

    let expected = 0.1 * 100_000.0 + 5.0 * f64::from(score);
    assert!((fitness[0] - expected).abs() < 1e-6, "{} vs {expected}", fitness[0]);
}
