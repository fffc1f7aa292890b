//! Tree cell with elevation and fire condition.

use crate::core_types::condition::Condition;
use crate::core_types::spatial::Position;
use serde::{Deserialize, Serialize};

/// A single tree on the grid.
///
/// Position and elevation are fixed at creation. The condition only moves forward
/// through [`Condition`]'s state machine; the mutators refuse any other transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    elevation: f64,
    condition: Condition,
    /// Tick during which the tree caught fire. `None` for trees that were burning before
    /// the first tick (seeded ignition) or have never burned.
    ignited_during: Option<u64>,
}

/// Read-only view of a cell for renderers and reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub position: Position,
    pub condition: Condition,
    pub elevation: f64,
}

impl Cell {
    /// Create a fine (unburned) tree.
    pub fn new(position: Position, elevation: f64) -> Self {
        Self {
            position,
            elevation,
            condition: Condition::Fine,
            ignited_during: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    #[inline]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    #[inline]
    pub fn is_burning(&self) -> bool {
        self.condition == Condition::OnFire
    }

    /// Tick during which this tree was ignited by a neighbor, if any.
    pub fn ignited_during(&self) -> Option<u64> {
        self.ignited_during
    }

    /// Whether this tree spreads fire when activated during `tick`.
    ///
    /// A tree ignited earlier in the same tick is already `OnFire` but only spreads from
    /// the next tick on, unless `cascade` lets it act within the pass that lit it.
    pub fn spreads_during(&self, tick: u64, cascade: bool) -> bool {
        self.is_burning() && (cascade || self.ignited_during != Some(tick))
    }

    /// Set a fine tree on fire before the first tick. Returns `false` if not fine.
    pub(crate) fn ignite_initial(&mut self) -> bool {
        self.transition(Condition::OnFire)
    }

    /// Set a fine tree on fire during `tick`. Returns `false` if not fine.
    pub(crate) fn ignite(&mut self, tick: u64) -> bool {
        if self.transition(Condition::OnFire) {
            self.ignited_during = Some(tick);
            true
        } else {
            false
        }
    }

    /// Burn out a burning tree. Returns `false` if it was not on fire.
    pub(crate) fn burn_out(&mut self) -> bool {
        self.transition(Condition::BurnedOut)
    }

    fn transition(&mut self, next: Condition) -> bool {
        if self.condition.can_transition_to(next) {
            self.condition = next;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            position: self.position,
            condition: self.condition,
            elevation: self.elevation,
        }
    }
}
