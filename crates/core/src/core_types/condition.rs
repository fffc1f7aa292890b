//! Fire condition of a single tree cell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fire state of a tree.
///
/// Transitions are strictly one-directional: `Fine -> OnFire -> BurnedOut`.
/// A burned-out tree never re-ignites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Unburned fuel, can be ignited by a burning neighbor.
    Fine,
    /// Burning this tick, spreads to neighbors when activated.
    OnFire,
    /// Consumed, terminal.
    BurnedOut,
}

impl Condition {
    /// All conditions in lifecycle order.
    pub const ALL: [Condition; 3] = [Condition::Fine, Condition::OnFire, Condition::BurnedOut];

    /// Whether `self -> next` is a legal transition of the state machine.
    pub fn can_transition_to(self, next: Condition) -> bool {
        matches!(
            (self, next),
            (Condition::Fine, Condition::OnFire) | (Condition::OnFire, Condition::BurnedOut)
        )
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Condition::Fine => "Fine",
            Condition::OnFire => "On Fire",
            Condition::BurnedOut => "Burned Out",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
