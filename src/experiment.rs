use anyhow::{Context, Result};

use crate::{
    bayes::{ClassSet, NaiveBayesClassifier, Options},
    config::Args,
    corpus::{self, Record, Stance},
    features::Featurizer,
    metrics::Evaluation,
};

/// Everything a finished train/test run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The classifier's classes, in tie-break order.
    pub classes: Vec<Stance>,
    pub evaluation: Evaluation<Stance>,
    /// `(predicted, actual)` for each evaluated test record, in file order.
    pub predictions: Vec<(Option<Stance>, Option<Stance>)>,
    pub trained: usize,
    /// Training records dropped for falling in the neutral band.
    pub skipped: usize,
    pub distinct_features: usize,
}

/// Reads both CSV files named by `args` and runs the experiment on them.
pub fn run(args: &Args) -> Result<Outcome> {
    let featurizer = Featurizer::new(args.window).context("failed to build the featurizer")?;
    let train = corpus::read_records(&args.train)?;
    let test = corpus::read_records(&args.test)?;

    evaluate(&featurizer, &train, &test, args.class_set(), args.options())
}

/// Trains on the non-neutral `train` records, smooths, then classifies the
/// non-neutral `test` records.
pub fn evaluate(
    featurizer: &Featurizer,
    train: &[Record],
    test: &[Record],
    class_set: ClassSet<Stance>,
    options: Options,
) -> Result<Outcome> {
    let mut classifier = NaiveBayesClassifier::with_options(
        |record: &Record| featurizer.features(&record.response),
        Record::stance,
        class_set,
        options,
    );

    let mut trained = 0;
    let mut skipped = 0;
    for record in train {
        if record.is_neutral() {
            skipped += 1;
            continue;
        }
        classifier.add_sample(record)?;
        trained += 1;
    }
    classifier.smooth()?;

    let mut evaluation = Evaluation::new();
    let mut predictions = Vec::new();
    for record in test.iter().filter(|record| !record.is_neutral()) {
        let predicted = classifier
            .classify(record)
            .with_context(|| format!("failed to classify response {:?}", record.response))?;
        let actual = classifier.class_of(record);

        evaluation.record(predicted, actual);
        predictions.push((predicted, actual));
    }

    Ok(Outcome {
        classes: classifier.classes().to_vec(),
        evaluation,
        predictions,
        trained,
        skipped,
        distinct_features: classifier.tables().distinct_features(),
    })
}
