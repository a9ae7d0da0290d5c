use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    hash::Hash,
};

use crate::error::BayesError;

/// A map from keys to occurrence counts where absent keys read as zero.
///
/// Reads never create entries, only `increment`/`add` do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter<K: Eq + Hash> {
    counts: HashMap<K, u64>,
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Adds `delta` to the count for `key`, creating the entry if needed.
    pub fn add(&mut self, key: K, delta: u64) {
        *self.counts.entry(key).or_insert(0) += delta;
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of every stored count.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `get(key) / total()`, failing on an empty counter.
    pub fn probability<Q>(&self, key: &Q) -> Result<f64, BayesError>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let total = self.total();
        if total == 0 {
            return Err(BayesError::EmptyDistribution);
        }

        Ok(self.get(key) as f64 / total as f64)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, u64> {
        self.counts.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, u64> {
        self.counts.keys()
    }
}

impl<K: Eq + Hash + Clone> Counter<K> {
    /// Adds every count of `other` into this counter.
    pub fn merge(&mut self, other: &Counter<K>) {
        for (key, &count) in other.iter() {
            self.add(key.clone(), count);
        }
    }
}

impl<K: Eq + Hash> FromIterator<K> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for key in iter {
            counter.increment(key);
        }
        counter
    }
}

impl<'a, K: Eq + Hash> IntoIterator for &'a Counter<K> {
    type Item = (&'a K, &'a u64);
    type IntoIter = hash_map::Iter<'a, K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_key_reads_zero_without_inserting() {
        let counter: Counter<&str> = Counter::new();
        assert_eq!(counter.get("missing"), 0);
        assert!(counter.is_empty());
        assert!(!counter.contains("missing"));
    }

    #[test]
    fn increment_and_add_accumulate() {
        let mut counter = Counter::new();
        counter.increment("a");
        counter.increment("a");
        counter.add("b", 5);

        assert_eq!(counter.get("a"), 2);
        assert_eq!(counter.get("b"), 5);
        assert_eq!(counter.total(), 7);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn empty_total_is_zero() {
        let counter: Counter<u32> = Counter::new();
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn probability_of_empty_counter_fails() {
        let counter: Counter<&str> = Counter::new();
        assert_eq!(counter.probability("a"), Err(BayesError::EmptyDistribution));
    }

    #[test]
    fn probability_divides_by_total() {
        let counter: Counter<&str> = ["x", "x", "x", "y"].into_iter().collect();
        assert_eq!(counter.probability("x"), Ok(0.75));
        assert_eq!(counter.probability("y"), Ok(0.25));
        assert_eq!(counter.probability("z"), Ok(0.0));
    }

    #[test]
    fn merge_sums_counts() {
        let mut left: Counter<&str> = ["a", "b"].into_iter().collect();
        let right: Counter<&str> = ["b", "c", "c"].into_iter().collect();
        left.merge(&right);

        assert_eq!(left.get("a"), 1);
        assert_eq!(left.get("b"), 2);
        assert_eq!(left.get("c"), 2);
        assert_eq!(left.total(), 5);
    }

    proptest! {
        #[test]
        fn total_is_sum_of_counts(keys in prop::collection::vec(0u8..16, 0..200)) {
            let counter: Counter<u8> = keys.iter().copied().collect();
            let summed: u64 = (0u8..16).map(|k| counter.get(&k)).sum();
            prop_assert_eq!(counter.total(), summed);
            prop_assert_eq!(counter.total(), keys.len() as u64);
        }

        #[test]
        fn probabilities_sum_to_one(keys in prop::collection::vec(0u8..16, 1..200)) {
            let counter: Counter<u8> = keys.iter().copied().collect();
            let mut sum = 0.0;
            for key in counter.keys() {
                sum += counter.probability(key).unwrap();
            }
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn unincremented_keys_read_zero(keys in prop::collection::vec(0u8..8, 0..50), probe in 8u8..16) {
            let counter: Counter<u8> = keys.into_iter().collect();
            prop_assert_eq!(counter.get(&probe), 0);
            prop_assert!(!counter.contains(&probe));
        }
    }
}
