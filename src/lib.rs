//! Naive Bayes text classification with add-one smoothing, plus the pieces
//! needed to run an agree/disagree experiment over a CSV corpus.

pub mod bayes;
pub mod config;
pub mod corpus;
pub mod counter;
pub mod error;
pub mod experiment;
pub mod features;
pub mod metrics;

pub use bayes::{
    ClassSet, FrequencyTables, NaiveBayesClassifier, Options, Phase, Scoring, ZeroCountPolicy,
};
pub use counter::Counter;
pub use error::BayesError;
