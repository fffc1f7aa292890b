//! Activation of a single tree during a tick.

use crate::core_types::condition::Condition;
use crate::core_types::error::{Result, WildfireError};
use crate::grid::Grid;
use crate::physics::{IgnitionPolicy, TickConditions};

/// Everything a tree needs to decide spread during one tick.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpreadRule {
    pub policy: IgnitionPolicy,
    pub conditions: TickConditions,
    pub cascade: bool,
}

/// Activate the tree in `slot`.
///
/// A burning tree offers fire to each fine orthogonal neighbor, mutating the grid in
/// place, then burns out regardless of how many neighbors caught. Trees that are fine,
/// burned out, or were lit earlier in this tick (without cascade) do nothing.
pub(crate) fn activate(grid: &mut Grid, slot: usize, tick: u64, rule: &SpreadRule) -> Result<()> {
    let Some(source) = grid.cell(slot) else {
        let position = grid.position_of(slot);
        return Err(WildfireError::InvalidPosition {
            x: position.x,
            y: position.y,
            width: grid.width(),
            height: grid.height(),
        });
    };
    if !source.spreads_during(tick, rule.cascade) {
        return Ok(());
    }
    let source_elevation = source.elevation();

    for neighbor in grid.neighbor_slots(slot).into_iter().flatten() {
        if let Some(target) = grid.cell_mut(neighbor) {
            if target.condition() == Condition::Fine
                && rule
                    .policy
                    .ignites(source_elevation, target.elevation(), &rule.conditions)
            {
                target.ignite(tick);
            }
        }
    }

    if let Some(source) = grid.cell_mut(slot) {
        source.burn_out();
    }
    Ok(())
}
