use crate::{
    classification::Classification,
    probability::{self, FeatureProbability, WeightedAverage},
    store::FrequencyStore,
};
use std::{fmt::Debug, hash::Hash};
use tracing::debug;

/// Something that learns categories from feature sets and predicts them back.
pub trait Classifier<T, K> {
    /// Tells the classifier that `features` resulted in `category`.
    fn train(&mut self, category: K, features: &[T]);

    /// The most likely category for `features`, or `None` when nothing has
    /// been trained yet.
    fn classify(&self, features: &[T]) -> Option<Classification<T, K>>;

    /// Forgets everything learned so far.
    fn reset(&mut self);
}

/// Naive Bayes classifier over discrete features:
///
/// `classify(f1, ..., fn) = argmax(P(cat) * PROD(P(fi|cat)))`
///
/// `P(fi|cat)` is smoothed with a [`WeightedAverage`], so features never seen
/// in training contribute the assumed probability instead of zeroing the
/// product.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier<T, K> {
    store: FrequencyStore<T, K>,
    smoothing: WeightedAverage,
}

impl<T, K> Default for NaiveBayesClassifier<T, K> {
    fn default() -> Self {
        NaiveBayesClassifier {
            store: FrequencyStore::default(),
            smoothing: WeightedAverage::default(),
        }
    }
}

impl<T, K> NaiveBayesClassifier<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(smoothing: WeightedAverage) -> Self {
        NaiveBayesClassifier {
            store: FrequencyStore::new(),
            smoothing,
        }
    }

    pub fn smoothing(&self) -> WeightedAverage {
        self.smoothing
    }

    pub fn store(&self) -> &FrequencyStore<T, K> {
        &self.store
    }

    /// True once at least one example has been trained.
    pub fn is_trained(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn train(&mut self, category: K, features: &[T]) {
        for feature in features {
            self.store.increment_feature(feature, &category);
        }
        self.store.increment_category(&category);

        debug!(?category, features = features.len(), "trained example");
    }

    /// Trains with a classification's features and category, e.g. one the
    /// caller has confirmed to be correct.
    pub fn learn(&mut self, classification: &Classification<T, K>) {
        self.train(classification.category.clone(), &classification.features);
    }

    pub fn feature_probability(&self, feature: &T, category: &K) -> f64 {
        self.store.feature_probability(feature, category)
    }

    /// Smoothed `P(feature|category)` using this classifier's parameters.
    pub fn weighted_average_probability(&self, feature: &T, category: &K) -> f64 {
        probability::weighted_average_probability(
            &self.store,
            feature,
            category,
            self.smoothing,
            None,
        )
    }

    /// `P(category)` as a relative frequency, `0.0` before any training.
    pub fn category_prior(&self, category: &K) -> f64 {
        let total = self.store.total_category_count();
        if total == 0 {
            return 0.0;
        }
        self.store.category_count(category) as f64 / total as f64
    }

    /// `PROD(P(feature|category))`; `1.0` for an empty feature set.
    pub fn feature_set_likelihood(&self, features: &[T], category: &K) -> f64 {
        features.iter().fold(1.0, |acc, feature| {
            acc * self.weighted_average_probability(feature, category)
        })
    }

    /// Unnormalized posterior `P(category) * PROD(P(feature|category))`.
    ///
    /// Not divided by the marginal likelihood of `features`, so scores only
    /// compare against each other.
    pub fn score(&self, category: &K, features: &[T]) -> f64 {
        self.category_prior(category) * self.feature_set_likelihood(features, category)
    }

    /// Every known category with its score, best first.
    ///
    /// Equal scores keep the order in which the categories were first trained.
    pub fn ranked_scores(&self, features: &[T]) -> Vec<(K, f64)> {
        let mut scores: Vec<(usize, &K, f64)> = self
            .store
            .known_categories()
            .enumerate()
            .map(|(order, category)| (order, category, self.score(category, features)))
            .collect();

        scores.sort_by(|(order_a, _, score_a), (order_b, _, score_b)| {
            score_b.total_cmp(score_a).then(order_a.cmp(order_b))
        });

        scores
            .into_iter()
            .map(|(_, category, score)| (category.clone(), score))
            .collect()
    }

    /// Every known category's classification, least likely first.
    pub fn classify_detailed(&self, features: &[T]) -> Vec<Classification<T, K>> {
        self.ranked_scores(features)
            .into_iter()
            .rev()
            .map(|(category, score)| Classification::new(features.to_vec(), category, score))
            .collect()
    }

    pub fn classify(&self, features: &[T]) -> Option<Classification<T, K>> {
        let classification = self
            .ranked_scores(features)
            .into_iter()
            .next()
            .map(|(category, score)| Classification::new(features.to_vec(), category, score));

        match &classification {
            Some(result) => debug!(
                category = ?result.category,
                score = result.probability,
                "classified"
            ),
            None => debug!("classify called on an untrained classifier"),
        }

        classification
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }
}

impl<T, K> Classifier<T, K> for NaiveBayesClassifier<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone + Debug,
{
    fn train(&mut self, category: K, features: &[T]) {
        NaiveBayesClassifier::train(self, category, features)
    }

    fn classify(&self, features: &[T]) -> Option<Classification<T, K>> {
        NaiveBayesClassifier::classify(self, features)
    }

    fn reset(&mut self) {
        NaiveBayesClassifier::reset(self)
    }
}
