//! Random-activation scheduler.

use crate::core_types::error::Result;
use crate::core_types::rng::SimRng;
use rand::seq::SliceRandom;

/// Activates every registered tree exactly once per tick, in an order reshuffled every
/// tick.
///
/// Activation is a single sequential pass over the live grid: a tree activated later in
/// the tick sees every mutation made by trees activated before it. There is no snapshot
/// buffer.
#[derive(Debug, Clone, Default)]
pub struct RandomActivation {
    /// Grid slots of the live population, in registration order
    population: Vec<usize>,
    /// Completed ticks
    steps: u64,
}

impl RandomActivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree (by grid slot) to the live population. Only called while populating.
    pub fn register(&mut self, slot: usize) {
        self.population.push(slot);
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Registered slots in registration order.
    pub fn population(&self) -> &[usize] {
        &self.population
    }

    /// Completed ticks; also the index of the tick currently running.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run one tick: shuffle the population and call `activate(tick, slot)` for each
    /// slot in that order.
    ///
    /// # Errors
    ///
    /// The first error returned by `activate`. The rest of the tick is abandoned and the
    /// step counter is not advanced.
    pub fn tick<F>(&mut self, rng: &mut SimRng, mut activate: F) -> Result<()>
    where
        F: FnMut(u64, usize) -> Result<()>,
    {
        let mut order = self.population.clone();
        order.shuffle(rng);
        for slot in order {
            activate(self.steps, slot)?;
        }
        self.steps += 1;
        Ok(())
    }
}
