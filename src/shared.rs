use crate::{
    bayes::{Classifier, NaiveBayesClassifier},
    classification::Classification,
    probability::WeightedAverage,
};
use std::{
    fmt::Debug,
    hash::Hash,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A [`NaiveBayesClassifier`] that can be trained and queried from several
/// threads. Clones share one model.
///
/// Training holds the write lock for the whole example, so a concurrent
/// `classify` sees either none or all of its feature and category increments.
/// Queries only take the read lock and run in parallel.
#[derive(Debug)]
pub struct SharedClassifier<T, K> {
    inner: Arc<RwLock<NaiveBayesClassifier<T, K>>>,
}

impl<T, K> Clone for SharedClassifier<T, K> {
    fn clone(&self) -> Self {
        SharedClassifier {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, K> Default for SharedClassifier<T, K> {
    fn default() -> Self {
        SharedClassifier {
            inner: Arc::new(RwLock::new(NaiveBayesClassifier::default())),
        }
    }
}

impl<T, K> From<NaiveBayesClassifier<T, K>> for SharedClassifier<T, K> {
    fn from(classifier: NaiveBayesClassifier<T, K>) -> Self {
        SharedClassifier {
            inner: Arc::new(RwLock::new(classifier)),
        }
    }
}

impl<T, K> SharedClassifier<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(smoothing: WeightedAverage) -> Self {
        NaiveBayesClassifier::with_smoothing(smoothing).into()
    }

    fn read(&self) -> RwLockReadGuard<'_, NaiveBayesClassifier<T, K>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NaiveBayesClassifier<T, K>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn train(&self, category: K, features: &[T]) {
        self.write().train(category, features);
    }

    pub fn learn(&self, classification: &Classification<T, K>) {
        self.write().learn(classification);
    }

    pub fn classify(&self, features: &[T]) -> Option<Classification<T, K>> {
        self.read().classify(features)
    }

    pub fn ranked_scores(&self, features: &[T]) -> Vec<(K, f64)> {
        self.read().ranked_scores(features)
    }

    pub fn is_trained(&self) -> bool {
        self.read().is_trained()
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    /// Runs `f` against a consistent view of the model.
    pub fn with_model<R>(&self, f: impl FnOnce(&NaiveBayesClassifier<T, K>) -> R) -> R {
        let model = self.read();
        f(&*model)
    }
}

impl<T, K> Classifier<T, K> for SharedClassifier<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone + Debug,
{
    fn train(&mut self, category: K, features: &[T]) {
        SharedClassifier::train(self, category, features)
    }

    fn classify(&self, features: &[T]) -> Option<Classification<T, K>> {
        SharedClassifier::classify(self, features)
    }

    fn reset(&mut self) {
        SharedClassifier::reset(self)
    }
}
