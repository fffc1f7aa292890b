//! Per-tick condition counts.
//!
//! One fixed set of counters filled by a single pass over the trees, appended once per
//! completed tick.

use crate::core_types::cell::Cell;
use crate::core_types::condition::Condition;
use serde::{Deserialize, Serialize};

/// Number of trees in each condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionCounts {
    pub fine: usize,
    pub on_fire: usize,
    pub burned_out: usize,
}

impl ConditionCounts {
    /// Count conditions in one pass.
    pub fn tally<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut counts = Self::default();
        for cell in cells {
            match cell.condition() {
                Condition::Fine => counts.fine += 1,
                Condition::OnFire => counts.on_fire += 1,
                Condition::BurnedOut => counts.burned_out += 1,
            }
        }
        counts
    }

    pub fn get(&self, condition: Condition) -> usize {
        match condition {
            Condition::Fine => self.fine,
            Condition::OnFire => self.on_fire,
            Condition::BurnedOut => self.burned_out,
        }
    }

    pub fn total(&self) -> usize {
        self.fine + self.on_fire + self.burned_out
    }
}

/// Counts recorded after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSample {
    /// Zero-based index of the completed tick
    pub tick: u64,
    #[serde(flatten)]
    pub counts: ConditionCounts,
}

/// Append-only time series of [`MetricsSample`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsCollector {
    samples: Vec<MetricsSample>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the counts for a completed tick.
    pub fn collect(&mut self, tick: u64, counts: ConditionCounts) -> MetricsSample {
        let sample = MetricsSample { tick, counts };
        self.samples.push(sample);
        sample
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&MetricsSample> {
        self.samples.last()
    }

    /// Full history, oldest first.
    pub fn samples(&self) -> &[MetricsSample] {
        &self.samples
    }

    /// History of a single condition's count.
    pub fn series(&self, condition: Condition) -> Vec<usize> {
        self.samples.iter().map(|s| s.counts.get(condition)).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
