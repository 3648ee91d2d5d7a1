use indexmap::IndexMap;
use std::{
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};

/// Feature and category occurrence counts learned from labeled examples.
///
/// Categories keep the order in which they were first seen. Missing keys
/// always read as a count of zero.
#[derive(Debug, Clone)]
pub struct FrequencyStore<T, K> {
    feature_counts: HashMap<T, HashMap<K, u64>>,
    category_counts: IndexMap<K, u64>,
}

impl<T, K> Default for FrequencyStore<T, K> {
    fn default() -> Self {
        FrequencyStore {
            feature_counts: HashMap::new(),
            category_counts: IndexMap::new(),
        }
    }
}

impl<T, K> FrequencyStore<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `feature` under `category`.
    pub fn increment_feature(&mut self, feature: &T, category: &K) {
        let categories = match self.feature_counts.entry(feature.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(HashMap::new()),
        };
        *categories.entry(category.clone()).or_insert(0) += 1;
    }

    /// Records one more training example labeled `category`.
    pub fn increment_category(&mut self, category: &K) {
        *self.category_counts.entry(category.clone()).or_insert(0) += 1;
    }

    pub fn feature_count(&self, feature: &T, category: &K) -> u64 {
        self.feature_counts
            .get(feature)
            .and_then(|categories| categories.get(category))
            .copied()
            .unwrap_or(0)
    }

    pub fn category_count(&self, category: &K) -> u64 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Number of training examples seen so far, over all categories.
    pub fn total_category_count(&self) -> u64 {
        self.category_counts.values().sum()
    }

    /// Occurrences of `feature` summed over every known category.
    pub fn feature_totals(&self, feature: &T) -> u64 {
        self.feature_counts
            .get(feature)
            .map(|categories| {
                categories
                    .iter()
                    .filter(|(category, _)| self.category_counts.contains_key(*category))
                    .map(|(_, count)| count)
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn known_features(&self) -> impl Iterator<Item = &T> {
        self.feature_counts.keys()
    }

    /// Known categories in first-seen order.
    pub fn known_categories(&self) -> impl Iterator<Item = &K> {
        self.category_counts.keys()
    }

    pub fn feature_len(&self) -> usize {
        self.feature_counts.len()
    }

    pub fn category_len(&self) -> usize {
        self.category_counts.len()
    }

    /// True until the first category has been recorded.
    pub fn is_empty(&self) -> bool {
        self.category_counts.is_empty()
    }

    pub fn reset(&mut self) {
        self.feature_counts.clear();
        self.category_counts.clear();
    }
}
