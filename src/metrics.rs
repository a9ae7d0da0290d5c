use std::{fmt::Display, fmt::Write, hash::Hash};

use crate::counter::Counter;

/// Accumulates predicted/actual pairs for accuracy, precision and recall.
#[derive(Debug, Clone)]
pub struct Evaluation<C: Eq + Hash> {
    true_counts: Counter<Option<C>>,
    false_counts: Counter<Option<C>>,
    real_counts: Counter<Option<C>>,
}

impl<C: Eq + Hash> Default for Evaluation<C> {
    fn default() -> Self {
        Self {
            true_counts: Counter::new(),
            false_counts: Counter::new(),
            real_counts: Counter::new(),
        }
    }
}

impl<C: Eq + Hash + Clone> Evaluation<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, predicted: Option<C>, actual: Option<C>) {
        self.real_counts.increment(actual.clone());
        if predicted == actual {
            self.true_counts.increment(predicted);
        } else {
            self.false_counts.increment(predicted);
        }
    }

    /// Number of recorded predictions.
    pub fn evaluated(&self) -> u64 {
        self.real_counts.total()
    }

    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.true_counts.total(), self.evaluated())
    }

    /// Fraction of predictions of `class` that were right.
    pub fn precision(&self, class: &C) -> Option<f64> {
        let label = Some(class.clone());
        let hits = self.true_counts.get(&label);
        ratio(hits, hits + self.false_counts.get(&label))
    }

    /// Fraction of records of `class` that were predicted as such.
    pub fn recall(&self, class: &C) -> Option<f64> {
        let label = Some(class.clone());
        ratio(self.true_counts.get(&label), self.real_counts.get(&label))
    }

    /// Accuracy followed by precision and recall for each of `classes`.
    pub fn render(&self, classes: &[C]) -> String
    where
        C: Display,
    {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Accuracy: {}", show(self.accuracy()));
        for class in classes {
            let _ = writeln!(out, "Precision for {}: {}", class, show(self.precision(class)));
            let _ = writeln!(out, "Recall for {}: {}", class, show(self.recall(class)));
        }
        out
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_evaluation_reports_nothing() {
        let evaluation: Evaluation<&str> = Evaluation::new();
        assert_eq!(evaluation.accuracy(), None);
        assert_eq!(evaluation.precision(&"A"), None);
        assert_eq!(evaluation.recall(&"A"), None);
    }

    #[test]
    fn counts_hits_and_misses() {
        let mut evaluation = Evaluation::new();
        evaluation.record(Some("A"), Some("A"));
        evaluation.record(Some("A"), Some("A"));
        evaluation.record(Some("A"), Some("B"));
        evaluation.record(Some("B"), Some("B"));

        assert_eq!(evaluation.evaluated(), 4);
        assert_eq!(evaluation.accuracy(), Some(0.75));
        assert_eq!(evaluation.precision(&"A"), Some(2.0 / 3.0));
        assert_eq!(evaluation.precision(&"B"), Some(1.0));
        assert_eq!(evaluation.recall(&"A"), Some(1.0));
        assert_eq!(evaluation.recall(&"B"), Some(0.5));
    }

    #[test]
    fn render_lists_each_class() {
        let mut evaluation = Evaluation::new();
        evaluation.record(Some("A"), Some("A"));
        evaluation.record(None, Some("B"));

        assert_eq!(
            evaluation.render(&["A", "B"]),
            "Accuracy: 0.5\n\
             Precision for A: 1\n\
             Recall for A: 1\n\
             Precision for B: n/a\n\
             Recall for B: 0\n"
        );
    }
}
