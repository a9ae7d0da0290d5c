use thiserror::Error;

use crate::bayes::Phase;

/// Errors raised by the counting and classification core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BayesError {
    /// A probability was requested from a counter whose total is zero.
    #[error("cannot estimate a probability from an empty distribution")]
    EmptyDistribution,

    /// An operation was called out of the train -> smooth -> classify order.
    #[error("`{operation}` is not allowed while the classifier is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// Strict mode hit a feature/class pair with no count.
    #[error("feature {feature} has a zero count for class {class}")]
    ZeroCount { feature: String, class: String },

    /// Two classifiers declared different class sets and cannot be merged.
    #[error("cannot merge classifiers with different class sets")]
    IncompatibleClassSets,
}
