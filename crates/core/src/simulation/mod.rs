//! Fire spread orchestration
//!
//! `SpreadEngine` composes:
//! - Synthetic terrain ([`ElevationField`])
//! - Pre-generated wind ([`WindSeries`])
//! - The tree grid ([`Grid`]) and its random-activation scheduler
//! - Per-tick metrics ([`MetricsCollector`])

pub mod batch;
pub mod config;
pub mod metrics;
pub mod scheduler;
pub(crate) mod spread;

pub use batch::{BatchResult, BatchRunner};
pub use config::SimulationConfig;
pub use metrics::{ConditionCounts, MetricsCollector, MetricsSample};
pub use scheduler::RandomActivation;

use crate::core_types::cell::{Cell, CellSnapshot};
use crate::core_types::condition::Condition;
use crate::core_types::error::{Result, WildfireError};
use crate::core_types::rng::{sim_rng, SimRng};
use crate::core_types::spatial::Position;
use crate::grid::{ElevationField, Grid, WindSample, WindSeries};
use rand::Rng;
use spread::SpreadRule;
use tracing::{debug, info};

/// The wildfire spread model.
///
/// Each [`step`](Self::step) activates every tree once in random order, samples the
/// condition counts, and halts the run once nothing is burning. Stepping a halted engine
/// does nothing.
pub struct SpreadEngine {
    config: SimulationConfig,
    grid: Grid,
    elevation: ElevationField,
    wind: WindSeries,
    scheduler: RandomActivation,
    metrics: MetricsCollector,
    rng: SimRng,
    running: bool,
}

impl SpreadEngine {
    /// Build a run from its configuration alone.
    ///
    /// Draws, in order from one RNG seeded with `config.seed`: the terrain, the wind series
    /// (`config.max_ticks` samples) and the tree placement.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if any parameter is out of range.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = sim_rng(config.seed);
        let elevation =
            ElevationField::generate(config.height, config.width, &config.elevation, &mut rng)?;
        let wind = WindSeries::generate(tick_budget(&config)?, &config.wind, &mut rng)?;
        Self::assemble(config, elevation, wind, rng)
    }

    /// Build a run on caller-supplied terrain. Wind and placement are still drawn from
    /// the seeded RNG.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for bad parameters or terrain of the wrong size.
    pub fn with_elevation_field(config: SimulationConfig, elevation: ElevationField) -> Result<Self> {
        config.validate()?;
        let mut rng = sim_rng(config.seed);
        let wind = WindSeries::generate(tick_budget(&config)?, &config.wind, &mut rng)?;
        Self::assemble(config, elevation, wind, rng)
    }

    /// Build a run on caller-supplied terrain and wind.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for bad parameters, terrain of the wrong size, or a wind
    /// series shorter than `config.max_ticks`.
    pub fn with_environment(
        config: SimulationConfig,
        elevation: ElevationField,
        wind: WindSeries,
    ) -> Result<Self> {
        config.validate()?;
        let rng = sim_rng(config.seed);
        Self::assemble(config, elevation, wind, rng)
    }

    fn assemble(
        config: SimulationConfig,
        elevation: ElevationField,
        wind: WindSeries,
        mut rng: SimRng,
    ) -> Result<Self> {
        if elevation.height() != config.height || elevation.width() != config.width {
            return Err(WildfireError::invalid_config(
                "elevation",
                format!(
                    "field is {}x{}, grid is {}x{}",
                    elevation.width(),
                    elevation.height(),
                    config.width,
                    config.height
                ),
            ));
        }
        if wind.len() < tick_budget(&config)? {
            return Err(WildfireError::invalid_config(
                "wind.length",
                format!(
                    "series of {} samples cannot cover {} ticks",
                    wind.len(),
                    config.max_ticks
                ),
            ));
        }

        let mut grid = Grid::new(config.height, config.width)?;
        let mut scheduler = RandomActivation::new();
        let mut ignited = 0_usize;

        // Column-major so each column is drawn top to bottom
        for x in 0..config.width {
            for y in 0..config.height {
                if rng.random::<f64>() < config.density {
                    let position = Position::new(x, y);
                    let mut cell = Cell::new(position, elevation.at(position)?);
                    if x == config.ignition_column && cell.ignite_initial() {
                        ignited += 1;
                    }
                    let slot = grid.place(cell)?;
                    scheduler.register(slot);
                }
            }
        }

        info!(
            "Spread engine initialized: {}x{} grid, {} trees ({} burning), policy={}, seed={}",
            config.width,
            config.height,
            scheduler.len(),
            ignited,
            config.policy.name(),
            config.seed
        );

        Ok(Self {
            config,
            grid,
            elevation,
            wind,
            scheduler,
            metrics: MetricsCollector::new(),
            rng,
            running: true,
        })
    }

    /// Advance one tick.
    ///
    /// Activates every tree once in a fresh random order, records the condition counts,
    /// and clears the running flag once no tree is on fire. No-op once halted.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if a wind-aware policy runs past the wind series. The check
    /// happens before any tree is touched, so a failed tick leaves the grid unchanged.
    pub fn step(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }

        let tick = self.scheduler.steps();
        let conditions = self
            .config
            .policy
            .conditions_for(tick, &self.wind, &self.elevation)?;
        if self.config.policy.uses_wind() {
            debug!(
                "Tick {}: wind={:.0}, threshold={:.2}",
                tick, conditions.wind_speed, conditions.threshold
            );
        }

        let rule = SpreadRule {
            policy: self.config.policy,
            conditions,
            cascade: self.config.cascade_within_tick,
        };
        let grid = &mut self.grid;
        self.scheduler
            .tick(&mut self.rng, |tick, slot| spread::activate(grid, slot, tick, &rule))?;

        let counts = self.counts();
        self.metrics.collect(tick, counts);
        debug!(
            "Tick {}: fine={}, on_fire={}, burned_out={}",
            tick, counts.fine, counts.on_fire, counts.burned_out
        );

        if counts.on_fire == 0 {
            self.running = false;
            info!(
                "Fire out after {} ticks: {} burned, {} untouched",
                self.scheduler.steps(),
                counts.burned_out,
                counts.fine
            );
        }
        Ok(())
    }

    /// Step until the fire is out or `max_ticks` ticks have run. Returns completed ticks.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`step`](Self::step).
    pub fn run(&mut self) -> Result<u64> {
        while self.running && self.scheduler.steps() < self.config.max_ticks {
            self.step()?;
        }
        Ok(self.scheduler.steps())
    }

    /// Number of trees in `condition`, by linear scan.
    pub fn count(&self, condition: Condition) -> usize {
        self.grid
            .cells()
            .filter(|cell| cell.condition() == condition)
            .count()
    }

    /// All three counts in one pass.
    pub fn counts(&self) -> ConditionCounts {
        ConditionCounts::tally(self.grid.cells())
    }

    /// `true` until a tick ends with nothing on fire.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed ticks.
    pub fn ticks(&self) -> u64 {
        self.scheduler.steps()
    }

    /// Trees placed at initialization. Constant for the whole run.
    pub fn placed_cells(&self) -> usize {
        self.scheduler.len()
    }

    /// Condition and elevation at a position, `None` if no tree stands there.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position is off-grid.
    pub fn cell_at(&self, position: Position) -> Result<Option<CellSnapshot>> {
        Ok(self.grid.get(position)?.map(Cell::snapshot))
    }

    /// Row-major conditions of every slot, `None` for empty ones.
    pub fn conditions(&self) -> Vec<Option<Condition>> {
        (0..self.grid.slot_count())
            .map(|slot| self.grid.cell(slot).map(Cell::condition))
            .collect()
    }

    /// Wind sample driving the next tick, `None` once the series is exhausted.
    pub fn current_wind(&self) -> Option<WindSample> {
        self.wind.sample_at(self.scheduler.steps()).ok()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn elevation(&self) -> &ElevationField {
        &self.elevation
    }

    pub fn wind(&self) -> &WindSeries {
        &self.wind
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}

fn tick_budget(config: &SimulationConfig) -> Result<usize> {
    usize::try_from(config.max_ticks).map_err(|_| {
        WildfireError::invalid_config(
            "max_ticks",
            format!("{} does not fit in memory", config.max_ticks),
        )
    })
}
