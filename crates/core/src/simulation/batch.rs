//! Parameter sweeps over many independent runs.
//!
//! Every (density, iteration) pair becomes one seeded run; runs share nothing, so they
//! execute in parallel on the rayon pool and results come back in job order.

use crate::core_types::error::{Result, WildfireError};
use crate::simulation::{ConditionCounts, SimulationConfig, SpreadEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of one run in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub density: f64,
    pub seed: u64,
    /// Ticks completed
    pub ticks: u64,
    /// `false` if the tick budget ran out with fire still burning
    pub halted: bool,
    pub final_counts: ConditionCounts,
}

impl BatchResult {
    /// Share of placed trees that burned, 0 when nothing was placed.
    pub fn burned_fraction(&self) -> f64 {
        let total = self.final_counts.total();
        if total == 0 {
            0.0
        } else {
            self.final_counts.burned_out as f64 / total as f64
        }
    }
}

/// Runs a base configuration across densities and repeated seeds.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    base: SimulationConfig,
    densities: Vec<f64>,
    iterations: usize,
}

impl BatchRunner {
    /// Run `iterations` seeds for each density. Run `i` uses seed `base.seed + i`.
    pub fn new(base: SimulationConfig, densities: Vec<f64>, iterations: usize) -> Self {
        Self {
            base,
            densities,
            iterations,
        }
    }

    /// Every job as a validated config, in result order.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for an empty sweep or any invalid density.
    pub fn jobs(&self) -> Result<Vec<SimulationConfig>> {
        if self.densities.is_empty() || self.iterations == 0 {
            return Err(WildfireError::invalid_config(
                "batch",
                "needs at least one density and one iteration",
            ));
        }
        let mut jobs = Vec::with_capacity(self.densities.len() * self.iterations);
        let mut run_index = 0_u64;
        for &density in &self.densities {
            for _ in 0..self.iterations {
                let config = SimulationConfig {
                    density,
                    seed: self.base.seed.wrapping_add(run_index),
                    ..self.base
                };
                config.validate()?;
                jobs.push(config);
                run_index += 1;
            }
        }
        Ok(jobs)
    }

    /// Execute the sweep.
    ///
    /// # Errors
    ///
    /// The first configuration or stepping error of any run.
    pub fn run(&self) -> Result<Vec<BatchResult>> {
        let jobs = self.jobs()?;
        info!(
            "Batch sweep: {} densities x {} iterations = {} runs",
            self.densities.len(),
            self.iterations,
            jobs.len()
        );

        jobs.par_iter()
            .map(|config| -> Result<BatchResult> {
                let mut engine = SpreadEngine::new(*config)?;
                let ticks = engine.run()?;
                if engine.is_running() {
                    warn!(
                        "Run with density {} seed {} hit the {}-tick budget while still burning",
                        config.density, config.seed, config.max_ticks
                    );
                }
                Ok(BatchResult {
                    density: config.density,
                    seed: config.seed,
                    ticks,
                    halted: !engine.is_running(),
                    final_counts: engine.counts(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SimulationConfig {
        SimulationConfig {
            height: 15,
            width: 15,
            max_ticks: 300,
            seed: 100,
            ..Default::default()
        }
    }

    #[test]
    fn results_follow_job_order() {
        let runner = BatchRunner::new(base(), vec![0.2, 0.8], 3);
        let results = runner.run().expect("valid sweep");

        assert_eq!(results.len(), 6);
        let densities: Vec<f64> = results.iter().map(|r| r.density).collect();
        assert_eq!(densities, vec![0.2, 0.2, 0.2, 0.8, 0.8, 0.8]);
        let seeds: Vec<u64> = results.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102, 103, 104, 105]);
        assert!(results.iter().all(|r| r.halted));
    }

    #[test]
    fn sweep_matches_sequential_runs() {
        let runner = BatchRunner::new(base(), vec![0.6], 2);
        let results = runner.run().expect("valid sweep");

        for (config, result) in runner.jobs().expect("valid").into_iter().zip(&results) {
            let mut engine = SpreadEngine::new(config).expect("valid");
            let ticks = engine.run().expect("in budget");
            assert_eq!(result.ticks, ticks);
            assert_eq!(result.final_counts, engine.counts());
        }
    }

    #[test]
    fn denser_forests_burn_more() {
        let runner = BatchRunner::new(
            SimulationConfig {
                height: 30,
                width: 30,
                ..base()
            },
            vec![0.3, 0.9],
            4,
        );
        let results = runner.run().expect("valid sweep");
        let mean = |density: f64| {
            let picked: Vec<f64> = results
                .iter()
                .filter(|r| r.density == density)
                .map(BatchResult::burned_fraction)
                .collect();
            picked.iter().sum::<f64>() / picked.len() as f64
        };
        assert!(
            mean(0.9) > mean(0.3),
            "dense {} vs sparse {}",
            mean(0.9),
            mean(0.3)
        );
    }

    #[test]
    fn invalid_sweeps_are_rejected() {
        assert!(BatchRunner::new(base(), vec![], 3).run().is_err());
        assert!(BatchRunner::new(base(), vec![0.5], 0).run().is_err());
        assert!(BatchRunner::new(base(), vec![0.5, 1.5], 1).run().is_err());
    }
}
