//! Sample-level outcome counts

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// How many samples were reproduced exactly versus not
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOutcomes {
    /// Samples whose prediction equals the reference
    pub correct: u64,
    /// Samples whose prediction differs from the reference
    pub misclassified: u64,
}

impl SampleOutcomes {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.misclassified += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.correct + self.misclassified
    }

    /// Share of samples reproduced exactly (0.0 when nothing was evaluated)
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            self.correct as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn merge(&mut self, other: &SampleOutcomes) {
        self.correct += other.correct;
        self.misclassified += other.misclassified;
    }
}

impl AddAssign<&SampleOutcomes> for SampleOutcomes {
    fn add_assign(&mut self, other: &SampleOutcomes) {
        self.merge(other);
    }
}
