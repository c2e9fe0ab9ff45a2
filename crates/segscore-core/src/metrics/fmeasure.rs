//! Corpus-level precision, recall and F-measure
//!
//! Counts are micro-averaged: every span in the corpus weighs the same,
//! regardless of which sample it came from.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// Accumulator of true-positive, selected and target counts
///
/// Zero-denominator convention: with no predictions, precision is `1.0`;
/// with no gold spans, recall is `1.0`. Both rules apply independently, so
/// an empty prediction against an empty reference scores `1.0` across the
/// board. F-measure is `0.0` whenever precision and recall are both zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCounts")]
pub struct FMeasure {
    true_positive_count: u64,
    selected_count: u64,
    target_count: u64,
}

#[derive(Deserialize)]
struct RawCounts {
    true_positive_count: u64,
    selected_count: u64,
    target_count: u64,
}

impl TryFrom<RawCounts> for FMeasure {
    type Error = EvalError;

    fn try_from(raw: RawCounts) -> EvalResult<Self> {
        FMeasure::from_counts(raw.true_positive_count, raw.selected_count, raw.target_count)
            .ok_or_else(|| {
                EvalError::config(format!(
                    "true positive count {} exceeds selected ({}) or target ({}) count",
                    raw.true_positive_count, raw.selected_count, raw.target_count
                ))
            })
    }
}

impl FMeasure {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator with explicit counts, e.g. restored from a saved report
    ///
    /// Returns `None` if the true-positive count exceeds either total.
    pub fn from_counts(true_positive_count: u64, selected_count: u64, target_count: u64) -> Option<Self> {
        if true_positive_count > selected_count.min(target_count) {
            return None;
        }
        Some(Self {
            true_positive_count,
            selected_count,
            target_count,
        })
    }

    /// Add one sample's contribution
    ///
    /// Matching is one-to-one: each reference element can satisfy at most
    /// one prediction, so duplicates are counted by multiplicity.
    pub fn update_scores<T: Eq + Hash>(&mut self, references: &[T], predictions: &[T]) {
        self.true_positive_count += count_true_positives(references, predictions);
        self.selected_count += predictions.len() as u64;
        self.target_count += references.len() as u64;
    }

    pub fn true_positive_count(&self) -> u64 {
        self.true_positive_count
    }

    pub fn selected_count(&self) -> u64 {
        self.selected_count
    }

    pub fn target_count(&self) -> u64 {
        self.target_count
    }

    /// Fraction of predictions that were correct
    pub fn precision(&self) -> f64 {
        if self.selected_count > 0 {
            self.true_positive_count as f64 / self.selected_count as f64
        } else {
            1.0
        }
    }

    /// Fraction of gold spans that were found
    pub fn recall(&self) -> f64 {
        if self.target_count > 0 {
            self.true_positive_count as f64 / self.target_count as f64
        } else {
            1.0
        }
    }

    /// Harmonic mean of precision and recall
    pub fn fmeasure(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();

        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }

    /// Fold another accumulator's counts into this one
    pub fn merge(&mut self, other: &FMeasure) {
        self.true_positive_count += other.true_positive_count;
        self.selected_count += other.selected_count;
        self.target_count += other.target_count;
    }

    /// Pure form of [`merge`](Self::merge)
    pub fn merged(mut self, other: &FMeasure) -> FMeasure {
        self.merge(other);
        self
    }
}

/// Number of predictions matched one-to-one against the references
pub fn count_true_positives<T: Eq + Hash>(references: &[T], predictions: &[T]) -> u64 {
    let mut remaining: HashMap<&T, usize> = HashMap::with_capacity(references.len());
    for reference in references {
        *remaining.entry(reference).or_insert(0) += 1;
    }

    let mut matches = 0;
    for prediction in predictions {
        if let Some(count) = remaining.get_mut(prediction) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }
    matches
}

impl AddAssign<&FMeasure> for FMeasure {
    fn add_assign(&mut self, other: &FMeasure) {
        self.merge(other);
    }
}

impl AddAssign for FMeasure {
    fn add_assign(&mut self, other: FMeasure) {
        self.merge(&other);
    }
}

impl Add for FMeasure {
    type Output = FMeasure;

    fn add(self, other: FMeasure) -> FMeasure {
        self.merged(&other)
    }
}

impl Sum for FMeasure {
    fn sum<I: Iterator<Item = FMeasure>>(iter: I) -> Self {
        iter.fold(FMeasure::new(), Add::add)
    }
}

impl<'a> Sum<&'a FMeasure> for FMeasure {
    fn sum<I: Iterator<Item = &'a FMeasure>>(iter: I) -> Self {
        iter.fold(FMeasure::new(), |acc, f| acc.merged(f))
    }
}

impl fmt::Display for FMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Precision: {:.6}", self.precision())?;
        writeln!(f, "Recall: {:.6}", self.recall())?;
        write!(f, "F-Measure: {:.6}", self.fmeasure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn spans(ranges: &[(usize, usize)]) -> Vec<Span> {
        ranges
            .iter()
            .map(|&(start, end)| Span::new(start, end).unwrap())
            .collect()
    }

    #[test]
    fn test_perfect_match() {
        let reference = spans(&[(0, 3), (4, 7)]);
        let mut fm = FMeasure::new();
        fm.update_scores(&reference, &reference);

        assert_eq!(fm.precision(), 1.0);
        assert_eq!(fm.recall(), 1.0);
        assert_eq!(fm.fmeasure(), 1.0);
    }

    #[test]
    fn test_partial_prediction() {
        let mut fm = FMeasure::new();
        fm.update_scores(&spans(&[(0, 3), (4, 7)]), &spans(&[(0, 3)]));

        assert_eq!(fm.true_positive_count(), 1);
        assert_eq!(fm.selected_count(), 1);
        assert_eq!(fm.target_count(), 2);
        assert_eq!(fm.precision(), 1.0);
        assert_eq!(fm.recall(), 0.5);
        assert!((fm.fmeasure() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_against_empty_is_vacuously_perfect() {
        let mut fm = FMeasure::new();
        fm.update_scores::<Span>(&[], &[]);

        assert_eq!(fm.precision(), 1.0);
        assert_eq!(fm.recall(), 1.0);
        assert_eq!(fm.fmeasure(), 1.0);
    }

    #[test]
    fn test_no_predictions_against_gold() {
        let mut fm = FMeasure::new();
        fm.update_scores(&spans(&[(0, 3)]), &[]);

        assert_eq!(fm.precision(), 1.0);
        assert_eq!(fm.recall(), 0.0);
        assert!((fm.fmeasure() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_wrong_scores_zero() {
        let mut fm = FMeasure::new();
        fm.update_scores(&spans(&[(0, 3)]), &spans(&[(0, 2)]));

        assert_eq!(fm.precision(), 0.0);
        assert_eq!(fm.recall(), 0.0);
        assert_eq!(fm.fmeasure(), 0.0);
    }

    #[test]
    fn test_duplicates_match_one_to_one() {
        let mut fm = FMeasure::new();
        // one gold (0,3), predicted twice: only one can match
        fm.update_scores(&spans(&[(0, 3)]), &spans(&[(0, 3), (0, 3)]));
        assert_eq!(fm.true_positive_count(), 1);
        assert_eq!(fm.selected_count(), 2);

        let mut fm = FMeasure::new();
        fm.update_scores(&spans(&[(0, 3), (0, 3)]), &spans(&[(0, 3), (0, 3)]));
        assert_eq!(fm.true_positive_count(), 2);
    }

    #[test]
    fn test_order_is_irrelevant() {
        let mut fm = FMeasure::new();
        fm.update_scores(&spans(&[(0, 3), (4, 7)]), &spans(&[(4, 7), (0, 3)]));
        assert_eq!(fm.fmeasure(), 1.0);
    }

    #[test]
    fn test_update_is_additive_not_idempotent() {
        let reference = spans(&[(0, 3), (4, 7)]);
        let predicted = spans(&[(0, 3)]);

        let mut fm = FMeasure::new();
        fm.update_scores(&reference, &predicted);
        fm.update_scores(&reference, &predicted);

        assert_eq!(fm.true_positive_count(), 2);
        assert_eq!(fm.selected_count(), 2);
        assert_eq!(fm.target_count(), 4);
    }

    #[test]
    fn test_merge_identity_commutative_associative() {
        let a = FMeasure::from_counts(2, 2, 2).unwrap();
        let b = FMeasure::from_counts(1, 1, 3).unwrap();
        let c = FMeasure::from_counts(0, 1, 0).unwrap();

        assert_eq!(a.merged(&FMeasure::new()), a);
        assert_eq!(a.merged(&b), b.merged(&a));
        assert_eq!(a.merged(&b).merged(&c), a.merged(&b.merged(&c)));

        let total: FMeasure = [a, b, c].into_iter().sum();
        assert_eq!(total, FMeasure::from_counts(3, 4, 5).unwrap());
        assert!((total.precision() - 0.75).abs() < 1e-9);
        assert!((total.recall() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_from_counts_rejects_impossible_counts() {
        assert!(FMeasure::from_counts(3, 2, 5).is_none());
        assert!(FMeasure::from_counts(3, 5, 2).is_none());
    }

    #[test]
    fn test_deserialize_rejects_impossible_counts() {
        let restored: FMeasure = serde_json::from_str(
            r#"{"true_positive_count":2,"selected_count":4,"target_count":3}"#,
        )
        .unwrap();
        assert_eq!(restored, FMeasure::from_counts(2, 4, 3).unwrap());

        let err = serde_json::from_str::<FMeasure>(
            r#"{"true_positive_count":5,"selected_count":1,"target_count":1}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_display_is_stable() {
        let fm = FMeasure::from_counts(3, 4, 5).unwrap();
        assert_eq!(
            fm.to_string(),
            "Precision: 0.750000\nRecall: 0.600000\nF-Measure: 0.666667"
        );
    }
}
