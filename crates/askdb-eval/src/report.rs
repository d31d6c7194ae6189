//! Accuracy aggregation for an evaluation run.

use crate::Difficulty;
use std::collections::BTreeMap;

/// Correct/total counts for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Accuracy in percent. An empty bucket reports 0.0 instead of dividing
    /// by zero.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

/// Aggregate accuracy: overall and stratified by difficulty tier.
///
/// Exists only for the duration of one evaluation run. All three tiers are
/// present from the start so the report shape never depends on which labels
/// the dataset happened to contain.
#[derive(Debug, Clone)]
pub struct AccuracyReport {
    pub overall: Tally,
    per_difficulty: BTreeMap<Difficulty, Tally>,
}

impl AccuracyReport {
    pub fn new() -> Self {
        let per_difficulty = Difficulty::ALL
            .iter()
            .map(|d| (*d, Tally::default()))
            .collect();
        Self {
            overall: Tally::default(),
            per_difficulty,
        }
    }

    pub fn record(&mut self, difficulty: Difficulty, correct: bool) {
        self.overall.record(correct);
        self.per_difficulty
            .entry(difficulty)
            .or_default()
            .record(correct);
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> Tally {
        self.per_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }

    /// Tallies in tier order (simple, medium, complex).
    pub fn by_difficulty(&self) -> impl Iterator<Item = (Difficulty, Tally)> + '_ {
        self.per_difficulty.iter().map(|(d, t)| (*d, *t))
    }
}

impl Default for AccuracyReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts() {
        let mut tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally.correct, 2);
        assert_eq!(tally.total, 3);
    }

    #[test]
    fn test_percent_guards_empty_bucket() {
        assert_eq!(Tally::default().percent(), 0.0);

        let mut tally = Tally::default();
        tally.record(true);
        tally.record(false);
        assert_eq!(tally.percent(), 50.0);
    }

    #[test]
    fn test_report_stratifies_by_difficulty() {
        let mut report = AccuracyReport::new();
        report.record(Difficulty::Simple, true);
        report.record(Difficulty::Simple, false);
        report.record(Difficulty::Complex, true);

        assert_eq!(report.overall.correct, 2);
        assert_eq!(report.overall.total, 3);
        assert_eq!(report.for_difficulty(Difficulty::Simple).total, 2);
        assert_eq!(report.for_difficulty(Difficulty::Complex).correct, 1);
        // untouched tier is present with zero counts
        assert_eq!(report.for_difficulty(Difficulty::Medium).total, 0);
    }

    #[test]
    fn test_by_difficulty_in_tier_order() {
        let report = AccuracyReport::new();
        let tiers: Vec<Difficulty> = report.by_difficulty().map(|(d, _)| d).collect();
        assert_eq!(tiers, Difficulty::ALL.to_vec());
    }
}
