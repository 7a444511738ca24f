/// Decision policy trait.
///
/// Each call maps one observation to an action vector. The generation
/// evaluator reads only the first scalar: above the jump threshold means
/// "jump". Policies are queried once per live agent per tick, in population
/// order, and must return before the tick can continue.
pub trait Policy {
    /// Produce an action vector for `observation`.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] when the policy cannot produce an action.
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("policy failed: {0}")]
    Failed(String),
    #[error("policy returned an empty action vector")]
    EmptyOutput,
    #[error("policy returned a non-finite action {0}")]
    NonFinite(f32),
}

/// What an agent sees each tick: its height and the vertical distance to
/// both edges of the reference gap.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub y: f32,
    pub to_gap_top: f32,
    pub to_gap_bottom: f32,
}

impl Observation {
    #[must_use]
    pub fn new(y: f32, gap_top: f32, gap_bottom: f32) -> Self {
        Self {
            y,
            to_gap_top: (y - gap_top).abs(),
            to_gap_bottom: (y - gap_bottom).abs(),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.y, self.to_gap_top, self.to_gap_bottom]
    }
}

/// Adapter turning a closure into a [`Policy`].
pub struct FnPolicy<F>(pub F);

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&Observation) -> Result<Vec<f32>, PolicyError>,
{
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError> {
        (self.0)(observation)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError> {
        (**self).evaluate(observation)
    }
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn evaluate(&mut self, observation: &Observation) -> Result<Vec<f32>, PolicyError> {
        (**self).evaluate(observation)
    }
}
