mod common;

use common::{always, never, population, Decide};
use generation::{
    evaluate_generation, GenerationConfig, GenerationError, GenerationEvaluator, PolicyFallback,
};
use ml::{FnPolicy, Observation, Policy, PolicyError};

fn silent(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(Vec::new())
}

fn nan(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(vec![f32::NAN])
}

fn broken(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Err(PolicyError::Failed("network unavailable".to_string()))
}

fn threshold(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(vec![0.5, 9.0])
}

fn first_error(decide: &[Decide]) -> GenerationError {
    let mut policies = population(decide);
    let mut fitness = vec![0.0_f64; decide.len()];
    match evaluate_generation(GenerationConfig::default(), &mut policies, &mut fitness) {
        Ok(outcome) => panic!("expected a policy error, got {outcome:?}"),
        Err(e) => e,
    }
}

#[test]
fn empty_action_aborts_with_the_agent_index() {
    let err = first_error(&[never, silent]);
    assert!(matches!(
        err,
        GenerationError::Policy { index: 1, source: PolicyError::EmptyOutput }
    ));
}

#[test]
fn non_finite_action_aborts() {
    let err = first_error(&[nan]);
    assert!(matches!(
        err,
        GenerationError::Policy { index: 0, source: PolicyError::NonFinite(v) } if v.is_nan()
    ));
}

#[test]
fn policy_failures_propagate() {
    let err = first_error(&[always, never, broken]);
    match err {
        GenerationError::Policy { index, source } => {
            assert_eq!(index, 2);
            assert_eq!(source, PolicyError::Failed("network unavailable".to_string()));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn no_jump_fallback_keeps_the_generation_running() {
    let config = GenerationConfig {
        policy_fallback: PolicyFallback::NoJump,
        ..GenerationConfig::default()
    };
    let mut policies = population(&[silent, broken, nan]);
    let mut fitness = vec![0.0_f64; 3];
    let outcome = evaluate_generation(config, &mut policies, &mut fitness).unwrap();
    assert_eq!(outcome.ticks, 24);
}

#[test]
fn action_at_the_threshold_does_not_jump() {
    let mut policies = population(&[threshold]);
    let mut fitness = vec![0.0_f64];
    let outcome =
        evaluate_generation(GenerationConfig::default(), &mut policies, &mut fitness).unwrap();
    assert_eq!(outcome.ticks, 24);
}

#[test]
fn boxed_policies_are_accepted() {
    let mut policies: Vec<Box<dyn ml::Policy>> = vec![
        Box::new(FnPolicy(never as Decide)),
        Box::new(ml::FeedForward::random(&[3, 4, 1], &mut fastrand::Rng::with_seed(5))),
    ];
    let mut fitness = vec![0.0_f64; 2];
    let outcome =
        evaluate_generation(GenerationConfig::default(), &mut policies, &mut fitness).unwrap();
    assert!(outcome.ticks >= 24);
}

#[test]
fn mismatched_slices_are_rejected() {
    let mut policies = population(&[never, never]);
    let mut fitness = vec![0.0_f64; 3];
    let result = GenerationEvaluator::new(GenerationConfig::default(), &mut policies, &mut fitness);
    assert!(matches!(
        result,
        Err(GenerationError::Misaligned { policies: 2, fitness: 3 })
    ));
}

/// Never jumps, and fails on the given call.
struct Flaky {
    calls: usize,
    fail_on: Option<usize>,
}

impl Flaky {
    fn new(fail_on: Option<usize>) -> Self {
        Self { calls: 0, fail_on }
    }
}

impl Policy for Flaky {
    fn evaluate(&mut self, _: &Observation) -> Result<Vec<f32>, PolicyError> {
        self.calls += 1;
        if self.fail_on == Some(self.calls) {
            return Err(PolicyError::Failed("transient".to_string()));
        }
        Ok(vec![0.0])
    }
}

#[test]
fn aborted_tick_leaves_no_trace() {
    let mut policies = vec![Flaky::new(None), Flaky::new(Some(1)), Flaky::new(None)];
    let mut fitness = vec![0.0_f64; 3];
    let mut evaluator =
        GenerationEvaluator::new(GenerationConfig::default(), &mut policies, &mut fitness).unwrap();
    let before = evaluator.frame();

    let err = evaluator.step();
    assert!(matches!(err, Err(GenerationError::Policy { index: 1, .. })));
    assert_eq!(evaluator.frame(), before);
    assert_eq!(evaluator.tick(), 0);

    // Retrying runs the same tick once, in lockstep.
    evaluator.step().unwrap();
    let frame = evaluator.frame();
    assert_eq!(frame.tick, 1);
    assert!(frame.agents.iter().all(|a| a.y == 351.5));
    drop(evaluator);
    assert_eq!(fitness, vec![0.1; 3]);
}
