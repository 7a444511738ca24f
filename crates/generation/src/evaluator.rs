//! # Generation Evaluator
//!
//! Owns the agents, obstacle pairs and ground of one generation and borrows
//! each contestant's policy and fitness cell from the optimizer. Agent,
//! policy and fitness travel together in one record, so removing a dead
//! agent is a single operation and population order is preserved.
//!
//! Removals never happen while policies are being queried. Agents are
//! tombstoned during the collision and boundary phases and the population is
//! compacted at the end of each of those phases.

use std::ops::ControlFlow;

use ml::{FitnessAccumulator, Observation, Policy, PolicyError};
use physics::{Agent, Ground, ObstaclePair, Silhouettes, GROUND_WIDTH};
use tracing::{debug, info, trace, warn};

use crate::config::{GenerationConfig, PolicyFallback};
use crate::error::GenerationError;
use crate::frame::{AgentView, Frame, ObstacleView};

/// Lifecycle of a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// At least one agent is alive.
    Running,
    /// Nobody is left. Terminal.
    Done,
}

/// Summary returned when a generation stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub ticks: u64,
    pub score: u32,
    /// `false` when an external quit request stopped the generation early.
    pub completed: bool,
}

/// Agent plus the optimizer-owned handles that belong to it.
struct Contestant<'g, P, F> {
    id: usize,
    agent: Agent,
    policy: &'g mut P,
    fitness: &'g mut F,
    alive: bool,
}

pub struct GenerationEvaluator<'g, P, F> {
    config: GenerationConfig,
    shapes: Silhouettes,
    rng: fastrand::Rng,
    contestants: Vec<Contestant<'g, P, F>>,
    obstacles: Vec<ObstaclePair>,
    ground: Ground,
    score: u32,
    tick: u64,
}

impl<'g, P, F> GenerationEvaluator<'g, P, F>
where
    P: Policy,
    F: FitnessAccumulator,
{
    /// Pair `policies[i]` with `fitness[i]` and place every agent at the
    /// configured start.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Misaligned`] when the slices differ in
    /// length and [`GenerationError::InvalidConfig`] for an unusable config.
    pub fn new(
        config: GenerationConfig,
        policies: &'g mut [P],
        fitness: &'g mut [F],
    ) -> Result<Self, GenerationError> {
        if policies.len() != fitness.len() {
            return Err(GenerationError::Misaligned {
                policies: policies.len(),
                fitness: fitness.len(),
            });
        }
        Self::from_pairs(config, policies.iter_mut().zip(fitness.iter_mut()))
    }

    /// Build from already-paired handles, in population order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] for an unusable config.
    pub fn from_pairs(
        config: GenerationConfig,
        pairs: impl IntoIterator<Item = (&'g mut P, &'g mut F)>,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        let start = Agent::new(config.agent_x, config.agent_y);
        let contestants = pairs
            .into_iter()
            .enumerate()
            .map(|(id, (policy, fitness))| Contestant {
                id,
                agent: start,
                policy,
                fitness,
                alive: true,
            })
            .collect();

        let mut rng = fastrand::Rng::new();
        let obstacles = vec![ObstaclePair::spawn(
            config.course.first_obstacle_x,
            &config.course,
            &mut rng,
        )];
        let ground = Ground::new(config.course.ground_y, GROUND_WIDTH);

        Ok(Self {
            config,
            shapes: Silhouettes::standard(),
            rng,
            contestants,
            obstacles,
            ground,
            score: 0,
            tick: 0,
        })
    }

    /// Use `rng` for gap draws. The starting pair is redrawn, so call this
    /// before the first tick.
    #[must_use]
    pub fn with_rng(mut self, mut rng: fastrand::Rng) -> Self {
        let course = &self.config.course;
        self.obstacles = vec![ObstaclePair::spawn(course.first_obstacle_x, course, &mut rng)];
        self.rng = rng;
        self
    }

    /// Replace the collision shapes.
    #[must_use]
    pub fn with_silhouettes(mut self, shapes: Silhouettes) -> Self {
        self.shapes = shapes;
        self
    }

    /// Replace the starting course. Call before the first tick.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: Vec<ObstaclePair>) -> Self {
        self.obstacles = obstacles;
        self
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.contestants.is_empty() {
            Status::Done
        } else {
            Status::Running
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn alive(&self) -> usize {
        self.contestants.len()
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.contestants.iter().map(|c| &c.agent)
    }

    #[must_use]
    pub fn obstacles(&self) -> &[ObstaclePair] {
        &self.obstacles
    }

    #[must_use]
    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Snapshot of the current state for drawing.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let pipe_height = self.shapes.pipe_height();
        Frame {
            tick: self.tick,
            score: self.score,
            alive: self.contestants.len(),
            agents: self
                .contestants
                .iter()
                .map(|c| AgentView {
                    id: c.id,
                    x: c.agent.x,
                    y: c.agent.y,
                    tilt: c.agent.tilt,
                })
                .collect(),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    top: o.top_origin(pipe_height),
                    bottom: o.gap_bottom,
                    gap_top: o.gap_top,
                    passed: o.passed,
                })
                .collect(),
            ground: [self.ground.x1, self.ground.x2],
        }
    }

    /// Advance the whole course by one tick.
    ///
    /// Stepping a finished generation is a no-op that returns
    /// [`Status::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Policy`] when a policy fails and the
    /// fallback is [`PolicyFallback::Abort`], and
    /// [`GenerationError::EmptyCourse`] if no pair is left to observe.
    pub fn step(&mut self) -> Result<Status, GenerationError> {
        if self.contestants.is_empty() {
            return Ok(Status::Done);
        }

        // Every policy is queried before any state changes, so an aborted
        // tick leaves the generation exactly as it was.
        let reference = self.reference_obstacle()?;
        let jumps = self.decide(&reference)?;
        self.tick += 1;
        self.reward_and_move(&jumps);
        self.ground.advance(self.config.course.scroll_speed);

        let (passed, retired) = self.scroll_and_collide();
        if passed {
            self.award_pass();
        }
        retire_obstacles(&mut self.obstacles, &retired);
        self.eliminate_out_of_bounds();

        trace!(tick = self.tick, alive = self.contestants.len(), score = self.score, "tick");
        Ok(self.status())
    }

    /// Step until the population is gone, handing every frame to `observer`.
    ///
    /// `observer` returning [`ControlFlow::Break`] is treated as a quit
    /// request: the generation stops at that tick boundary.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`GenerationEvaluator::step`].
    pub fn run(
        &mut self,
        mut observer: impl FnMut(&Frame) -> ControlFlow<()>,
    ) -> Result<Outcome, GenerationError> {
        info!(population = self.contestants.len(), "generation started");
        while self.status() == Status::Running {
            self.step()?;
            if observer(&self.frame()).is_break() {
                info!(tick = self.tick, score = self.score, "generation stopped by quit request");
                return Ok(self.outcome(false));
            }
        }
        info!(ticks = self.tick, score = self.score, "generation finished");
        Ok(self.outcome(true))
    }

    fn outcome(&self, completed: bool) -> Outcome {
        Outcome {
            ticks: self.tick,
            score: self.score,
            completed,
        }
    }

    /// The pair every agent observes this tick, chosen from the first
    /// agent's position and shared by the whole population.
    fn reference_obstacle(&self) -> Result<ObstaclePair, GenerationError> {
        let lead_x = self.contestants[0].agent.x;
        let width = self.shapes.pipe_width();
        let index = match self.obstacles.as_slice() {
            [first, _, ..] if lead_x > first.trailing_edge(width) => 1,
            _ => 0,
        };
        self.obstacles
            .get(index)
            .copied()
            .ok_or(GenerationError::EmptyCourse)
    }

    /// One jump decision per live agent, in population order.
    fn decide(&mut self, reference: &ObstaclePair) -> Result<Vec<bool>, GenerationError> {
        let threshold = self.config.jump_threshold;
        let fallback = self.config.policy_fallback;
        let tick = self.tick + 1;

        let mut jumps = Vec::with_capacity(self.contestants.len());
        for c in &mut self.contestants {
            let observation = Observation::new(c.agent.y, reference.gap_top, reference.gap_bottom);
            let jump = match wants_jump(&mut *c.policy, &observation, threshold) {
                Ok(jump) => jump,
                Err(source) => match fallback {
                    PolicyFallback::Abort => {
                        return Err(GenerationError::Policy { index: c.id, source });
                    }
                    PolicyFallback::NoJump => {
                        warn!(index = c.id, tick, error = %source, "policy failed, not jumping");
                        false
                    }
                },
            };
            jumps.push(jump);
        }
        Ok(jumps)
    }

    fn reward_and_move(&mut self, jumps: &[bool]) {
        let kin = self.config.kinematics;
        let alive_reward = self.config.rewards.alive;
        for (c, &jump) in self.contestants.iter_mut().zip(jumps) {
            c.fitness.add(alive_reward);
            if jump {
                c.agent.jump(&kin);
            }
            c.agent.advance(&kin);
        }
    }

    /// Scroll every pair and test it against the agents still alive.
    ///
    /// Returns whether any pair was passed this tick and, per pair, whether
    /// it has left the screen.
    fn scroll_and_collide(&mut self) -> (bool, Vec<bool>) {
        let speed = self.config.course.scroll_speed;
        let penalty = self.config.rewards.collision;
        let width = self.shapes.pipe_width();
        let mut passed_any = false;
        let mut retired = Vec::with_capacity(self.obstacles.len());

        for obstacle in &mut self.obstacles {
            obstacle.advance(speed);

            // The pass check uses whichever agent this loop visited last.
            let mut last_x = None;
            for c in self.contestants.iter_mut().filter(|c| c.alive) {
                last_x = Some(c.agent.x);
                if obstacle.collides_with(&c.agent, &self.shapes) {
                    c.fitness.add(penalty);
                    c.alive = false;
                    debug!(index = c.id, tick = self.tick, x = obstacle.x, "agent hit obstacle");
                }
            }

            retired.push(obstacle.is_off_screen(width));
            if !obstacle.passed && last_x.is_some_and(|x| x > obstacle.trailing_edge(width)) {
                obstacle.passed = true;
                passed_any = true;
            }
        }

        self.contestants.retain(|c| c.alive);
        (passed_any, retired)
    }

    fn award_pass(&mut self) {
        self.score += 1;
        let bonus = self.config.rewards.pass;
        for c in &mut self.contestants {
            c.fitness.add(bonus);
        }
        let course = &self.config.course;
        let pair = ObstaclePair::spawn(course.spawn_x, course, &mut self.rng);
        debug!(score = self.score, gap_top = pair.gap_top, "obstacle passed, spawned next pair");
        self.obstacles.push(pair);
    }

    fn eliminate_out_of_bounds(&mut self) {
        let course = self.config.course;
        let height = self.shapes.agent_height();
        for c in &mut self.contestants {
            let y = c.agent.y;
            if y + height - course.floor_margin >= course.floor || y < course.ceiling {
                c.alive = false;
                debug!(index = c.id, tick = self.tick, y, "agent left the course");
            }
        }
        self.contestants.retain(|c| c.alive);
    }
}

fn wants_jump<P: Policy>(
    policy: &mut P,
    observation: &Observation,
    threshold: f32,
) -> Result<bool, PolicyError> {
    let action = policy.evaluate(observation)?;
    let first = *action.first().ok_or(PolicyError::EmptyOutput)?;
    if !first.is_finite() {
        return Err(PolicyError::NonFinite(first));
    }
    Ok(first > threshold)
}

/// Drop the pairs flagged in `retired`. Pairs spawned after the flags were
/// computed are kept.
fn retire_obstacles(obstacles: &mut Vec<ObstaclePair>, retired: &[bool]) {
    let mut index = 0;
    obstacles.retain(|pair| {
        let keep = !retired.get(index).copied().unwrap_or(false);
        if !keep {
            debug!(x = pair.x, "obstacle left the screen");
        }
        index += 1;
        keep
    });
}

/// Evaluate one generation to completion.
///
/// `policies[i]` is scored into `fitness[i]`. Cells are added to, never
/// reset.
///
/// # Errors
///
/// See [`GenerationEvaluator::new`] and [`GenerationEvaluator::step`].
pub fn evaluate_generation<P, F>(
    config: GenerationConfig,
    policies: &mut [P],
    fitness: &mut [F],
) -> Result<Outcome, GenerationError>
where
    P: Policy,
    F: FitnessAccumulator,
{
    let mut evaluator = GenerationEvaluator::new(config, policies, fitness)?;
    evaluator.run(|_| ControlFlow::Continue(()))
}
