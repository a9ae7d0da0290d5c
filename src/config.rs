use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::{
    bayes::{ClassSet, Options, Scoring, ZeroCountPolicy},
    corpus::Stance,
    features::Featurizer,
};

/// Train a Naive Bayes stance classifier on one CSV file and evaluate it on another.
#[derive(Parser, Debug, Clone)]
#[command(name = "stance_bayes")]
#[command(version)]
pub struct Args {
    /// The CSV file holding the training set
    pub train: PathBuf,

    /// The CSV file holding the test set
    pub test: PathBuf,

    /// Which classes the classifier smooths over and predicts
    #[arg(long, value_enum, default_value_t = ClassPolicy::Declared)]
    pub classes: ClassPolicy,

    /// What to do with a feature that has no count for a class
    #[arg(long, value_enum, default_value_t = ZeroCounts::One)]
    pub zero_counts: ZeroCounts,

    /// How feature likelihoods are combined
    #[arg(long, value_enum, default_value_t = ScoringMode::Product)]
    pub scoring: ScoringMode,

    /// Number of leading response tokens used as features
    #[arg(long, default_value_t = Featurizer::DEFAULT_WINDOW)]
    pub window: usize,

    /// Write per-record predictions to this CSV file
    #[arg(long)]
    pub predictions: Option<PathBuf>,

    /// Print training statistics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPolicy {
    /// AGREE and DISAGREE, whether or not both occur in training
    Declared,
    /// Whatever classes the training set contains
    Inferred,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroCounts {
    /// Count a missing feature as one
    One,
    /// Fail on a missing feature
    Strict,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Multiply probabilities
    Product,
    /// Add log probabilities
    Log,
}

impl Args {
    pub fn class_set(&self) -> ClassSet<Stance> {
        match self.classes {
            ClassPolicy::Declared => ClassSet::Declared(Stance::ALL.to_vec()),
            ClassPolicy::Inferred => ClassSet::Inferred,
        }
    }

    pub fn options(&self) -> Options {
        Options {
            zero_counts: match self.zero_counts {
                ZeroCounts::One => ZeroCountPolicy::TreatAsOne,
                ZeroCounts::Strict => ZeroCountPolicy::Strict,
            },
            scoring: match self.scoring {
                ScoringMode::Product => Scoring::Product,
                ScoringMode::Log => Scoring::LogSpace,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["stance_bayes", "train.csv", "test.csv"]).unwrap();

        assert_eq!(args.train, PathBuf::from("train.csv"));
        assert_eq!(args.test, PathBuf::from("test.csv"));
        assert_eq!(args.window, 40);
        assert_eq!(args.predictions, None);
        assert!(!args.verbose);
        assert_eq!(args.options(), Options::default());
        assert_eq!(
            args.class_set(),
            ClassSet::Declared(vec![Stance::Agree, Stance::Disagree])
        );
    }

    #[test]
    fn every_flag() {
        let args = Args::try_parse_from([
            "stance_bayes",
            "a.csv",
            "b.csv",
            "--classes",
            "inferred",
            "--zero-counts",
            "strict",
            "--scoring",
            "log",
            "--window",
            "12",
            "--predictions",
            "out.csv",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.class_set(), ClassSet::Inferred);
        assert_eq!(
            args.options(),
            Options {
                zero_counts: ZeroCountPolicy::Strict,
                scoring: Scoring::LogSpace,
            }
        );
        assert_eq!(args.window, 12);
        assert_eq!(args.predictions, Some(PathBuf::from("out.csv")));
        assert!(args.verbose);
    }

    #[test]
    fn missing_test_set_is_rejected() {
        assert!(Args::try_parse_from(["stance_bayes", "train.csv"]).is_err());
    }
}
