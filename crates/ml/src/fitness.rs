//! Per-policy fitness cells owned by the optimizer.

/// A numeric cell the evaluator adds rewards and penalties to.
pub trait FitnessAccumulator {
    fn add(&mut self, delta: f64);
    fn value(&self) -> f64;
}

impl FitnessAccumulator for f64 {
    fn add(&mut self, delta: f64) {
        *self += delta;
    }

    fn value(&self) -> f64 {
        *self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Fitness(pub f64);

impl FitnessAccumulator for Fitness {
    fn add(&mut self, delta: f64) {
        self.0 += delta;
    }

    fn value(&self) -> f64 {
        self.0
    }
}

impl<F: FitnessAccumulator + ?Sized> FitnessAccumulator for &mut F {
    fn add(&mut self, delta: f64) {
        (**self).add(delta);
    }

    fn value(&self) -> f64 {
        (**self).value()
    }
}
