use std::{collections::HashMap, fmt, fmt::Debug, hash::Hash, marker::PhantomData};

use crate::{counter::Counter, error::BayesError};

/// Where a classifier is in its train -> smooth -> classify lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting samples. `smooth` moves on to `Smoothed`.
    Training,
    /// Counts are final and the classifier only answers queries.
    Smoothed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Training => write!(f, "training"),
            Phase::Smoothed => write!(f, "smoothed"),
        }
    }
}

/// The set of classes a classifier smooths over and chooses between.
///
/// The order of the classes is the tie-break order of `classify`: on equal
/// scores the class listed first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSet<C> {
    /// A fixed list given up front, so classes absent from training still
    /// receive smoothing mass.
    Declared(Vec<C>),
    /// Classes in the order they were first produced by the class extractor
    /// during training. Samples without a class never join this set.
    Inferred,
}

/// What `classify` does with a feature/class pair that has no count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroCountPolicy {
    /// Use a count of one, so novel features do not zero out a class.
    #[default]
    TreatAsOne,
    /// Fail with `BayesError::ZeroCount`.
    Strict,
}

/// How per-class scores are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scoring {
    /// `prior * product(likelihoods)`.
    #[default]
    Product,
    /// `ln(prior) + sum(ln(likelihoods))`. Same argmax, no underflow on long
    /// feature lists.
    LogSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub zero_counts: ZeroCountPolicy,
    pub scoring: Scoring,
}

/// Raw counts behind a Naive Bayes classifier.
///
/// Class keys are `Option<C>`: `None` holds samples whose class extractor
/// declined to label them. These tables do no lifecycle checking of their
/// own, see [`NaiveBayesClassifier`] for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTables<K: Eq + Hash, C: Eq + Hash> {
    class_counts: Counter<Option<C>>,
    feature_counts: HashMap<K, Counter<Option<C>>>,
    class_to_feature_counts: Counter<Option<C>>,
}

impl<K: Eq + Hash, C: Eq + Hash> Default for FrequencyTables<K, C> {
    fn default() -> Self {
        Self {
            class_counts: Counter::new(),
            feature_counts: HashMap::new(),
            class_to_feature_counts: Counter::new(),
        }
    }
}

impl<K, C> FrequencyTables<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sample. Repeated features are counted once per occurrence.
    pub fn add<I>(&mut self, class: Option<C>, features: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.class_counts.increment(class.clone());
        for feature in features {
            self.feature_counts
                .entry(feature)
                .or_default()
                .increment(class.clone());
            self.class_to_feature_counts.increment(class.clone());
        }
    }

    /// One round of add-one smoothing over `classes`.
    ///
    /// Every observed feature gains one count for each class in `classes`.
    /// Every class that has feature mass, and every class in `classes`, gains
    /// `distinct features + 1` of feature mass. Not idempotent.
    pub fn smooth(&mut self, classes: &[C]) {
        let distinct = self.feature_counts.len() as u64;

        for counter in self.feature_counts.values_mut() {
            for class in classes {
                counter.increment(Some(class.clone()));
            }
        }

        let mut smoothed: Vec<Option<C>> = self.class_to_feature_counts.keys().cloned().collect();
        for class in classes {
            let key = Some(class.clone());
            if !smoothed.contains(&key) {
                smoothed.push(key);
            }
        }
        for key in smoothed {
            self.class_to_feature_counts.add(key, distinct + 1);
        }
    }

    /// Adds every count of `other` into these tables.
    pub fn merge(&mut self, other: &FrequencyTables<K, C>) {
        self.class_counts.merge(&other.class_counts);
        self.class_to_feature_counts
            .merge(&other.class_to_feature_counts);
        for (feature, counter) in &other.feature_counts {
            self.feature_counts
                .entry(feature.clone())
                .or_default()
                .merge(counter);
        }
    }

    pub fn class_counts(&self) -> &Counter<Option<C>> {
        &self.class_counts
    }

    pub fn class_to_feature_counts(&self) -> &Counter<Option<C>> {
        &self.class_to_feature_counts
    }

    /// Count of `feature` under `class`, zero if either was never seen.
    pub fn feature_count(&self, feature: &K, class: &Option<C>) -> u64 {
        self.feature_counts
            .get(feature)
            .map_or(0, |counter| counter.get(class))
    }

    /// Number of distinct features observed.
    pub fn distinct_features(&self) -> usize {
        self.feature_counts.len()
    }

    pub fn has_feature(&self, feature: &K) -> bool {
        self.feature_counts.contains_key(feature)
    }

    /// Score of `class` for a sample with `features`.
    ///
    /// Under `Scoring::LogSpace` this is the natural log of the product score.
    pub fn score(&self, features: &[K], class: &C, options: Options) -> Result<f64, BayesError> {
        let label = Some(class.clone());
        let prior = self.class_counts.probability(&label)?;
        let mass = self.class_to_feature_counts.get(&label);
        if mass == 0 && !features.is_empty() {
            return Err(BayesError::EmptyDistribution);
        }

        match options.scoring {
            Scoring::Product => {
                let mut likelihood = 1.0;
                for feature in features {
                    let count = self.effective_count(feature, &label, options.zero_counts)?;
                    likelihood *= count as f64 / mass as f64;
                }
                Ok(likelihood * prior)
            }
            Scoring::LogSpace => {
                let mut log_likelihood = 0.0;
                for feature in features {
                    let count = self.effective_count(feature, &label, options.zero_counts)?;
                    log_likelihood += (count as f64).ln() - (mass as f64).ln();
                }
                Ok(log_likelihood + prior.ln())
            }
        }
    }

    /// Highest scoring class among `classes`, or `None` if `classes` is empty.
    ///
    /// Only a strictly greater score replaces the current best, so ties go to
    /// the class that comes first.
    pub fn best_class(
        &self,
        features: &[K],
        classes: &[C],
        options: Options,
    ) -> Result<Option<C>, BayesError> {
        let mut best: Option<(&C, f64)> = None;
        for class in classes {
            let score = self.score(features, class, options)?;
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((class, score));
            }
        }

        Ok(best.map(|(class, _)| class.clone()))
    }

    fn effective_count(
        &self,
        feature: &K,
        label: &Option<C>,
        policy: ZeroCountPolicy,
    ) -> Result<u64, BayesError> {
        match (self.feature_count(feature, label), policy) {
            (0, ZeroCountPolicy::TreatAsOne) => Ok(1),
            (0, ZeroCountPolicy::Strict) => Err(BayesError::ZeroCount {
                feature: format!("{:?}", feature),
                class: format!("{:?}", label),
            }),
            (count, _) => Ok(count),
        }
    }
}

/// A Naive Bayes classifier over samples of type `S`.
///
/// `featurizer` turns a sample into feature tokens and `classer` gives its
/// class, if any. Both are used for training and only `featurizer` is used
/// for classification. Call `add_sample` for every training sample, then
/// `smooth` exactly once, then `classify`; anything out of that order fails
/// with `BayesError::InvalidState`.
pub struct NaiveBayesClassifier<S, K, C, F, L>
where
    K: Eq + Hash,
    C: Eq + Hash,
{
    featurizer: F,
    classer: L,
    class_set: ClassSet<C>,
    options: Options,
    tables: FrequencyTables<K, C>,
    seen_classes: Vec<C>,
    phase: Phase,
    _sample: PhantomData<fn(&S)>,
}

impl<S, K, C, F, L> NaiveBayesClassifier<S, K, C, F, L>
where
    K: Eq + Hash + Clone + Debug,
    C: Eq + Hash + Clone + Debug,
    F: Fn(&S) -> Vec<K>,
    L: Fn(&S) -> Option<C>,
{
    pub fn new(featurizer: F, classer: L, class_set: ClassSet<C>) -> Self {
        Self::with_options(featurizer, classer, class_set, Options::default())
    }

    pub fn with_options(featurizer: F, classer: L, class_set: ClassSet<C>, options: Options) -> Self {
        NaiveBayesClassifier {
            featurizer,
            classer,
            class_set,
            options,
            tables: FrequencyTables::new(),
            seen_classes: Vec::new(),
            phase: Phase::Training,
            _sample: PhantomData,
        }
    }

    pub fn add_sample(&mut self, sample: &S) -> Result<(), BayesError> {
        self.require(Phase::Training, "add_sample")?;

        let class = (self.classer)(sample);
        let features = (self.featurizer)(sample);

        if let Some(class) = &class {
            if !self.seen_classes.contains(class) {
                self.seen_classes.push(class.clone());
            }
        }
        self.tables.add(class, features);

        Ok(())
    }

    /// Applies add-one smoothing and freezes the counts.
    pub fn smooth(&mut self) -> Result<(), BayesError> {
        self.require(Phase::Training, "smooth")?;

        let classes = match &self.class_set {
            ClassSet::Declared(classes) => classes,
            ClassSet::Inferred => &self.seen_classes,
        };
        self.tables.smooth(classes);
        self.phase = Phase::Smoothed;

        Ok(())
    }

    /// Predicts the class of `sample`. `Ok(None)` means the class set is empty.
    pub fn classify(&self, sample: &S) -> Result<Option<C>, BayesError> {
        self.require(Phase::Smoothed, "classify")?;

        let features = (self.featurizer)(sample);
        self.tables.best_class(&features, self.classes(), self.options)
    }

    /// The true class of `sample` according to the class extractor.
    pub fn class_of(&self, sample: &S) -> Option<C> {
        (self.classer)(sample)
    }

    /// Folds the counts of another training classifier into this one.
    ///
    /// Workers that train on separate partitions merge before the single
    /// shared `smooth` call.
    pub fn merge(&mut self, other: &Self) -> Result<(), BayesError> {
        self.require(Phase::Training, "merge")?;
        if other.phase != Phase::Training {
            return Err(BayesError::InvalidState {
                operation: "merge",
                phase: other.phase,
            });
        }
        if self.class_set != other.class_set {
            return Err(BayesError::IncompatibleClassSets);
        }

        self.tables.merge(&other.tables);
        for class in &other.seen_classes {
            if !self.seen_classes.contains(class) {
                self.seen_classes.push(class.clone());
            }
        }

        Ok(())
    }

    /// Classes in tie-break order.
    pub fn classes(&self) -> &[C] {
        match &self.class_set {
            ClassSet::Declared(classes) => classes,
            ClassSet::Inferred => &self.seen_classes,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn tables(&self) -> &FrequencyTables<K, C> {
        &self.tables
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), BayesError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(BayesError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }
}
