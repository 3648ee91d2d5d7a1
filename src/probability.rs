//! Conditional feature probabilities and the weighted-average smoothing
//! applied to them.
//!
//! The weighted average blends an assumed probability with the observed one:
//!
//! ```text
//! (weight * assumed + totals * basic) / (weight + totals)
//! ```
//!
//! where `basic` is `P(feature|category)` and `totals` is the number of times
//! the feature was seen across *all* categories. Rarely seen features stay
//! close to `assumed`; well observed ones converge to `basic`.

use crate::store::FrequencyStore;
use std::hash::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SmoothingError {
    #[error("weight must be positive and finite, got {0}")]
    Weight(f64),

    #[error("assumed probability must be within [0, 1], got {0}")]
    AssumedProbability(f64),
}

/// Source of the raw `P(feature|category)` used by the weighted average.
pub trait FeatureProbability<T, K> {
    fn feature_probability(&self, feature: &T, category: &K) -> f64;
}

impl<T, K> FeatureProbability<T, K> for FrequencyStore<T, K>
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone,
{
    /// `featureCount / categoryCount`, or `0.0` for a category never trained.
    ///
    /// A feature repeated inside one example is counted once per repetition,
    /// so this exceeds `1.0` when repetitions outnumber the category's examples.
    fn feature_probability(&self, feature: &T, category: &K) -> f64 {
        let category_count = self.category_count(category);
        if category_count == 0 {
            return 0.0;
        }
        self.feature_count(feature, category) as f64 / category_count as f64
    }
}

/// Smoothing parameters for [`weighted_average_probability`].
///
/// `weight` is always positive, so the blend never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedAverage {
    weight: f64,
    assumed_probability: f64,
}

impl Default for WeightedAverage {
    fn default() -> Self {
        WeightedAverage {
            weight: 1.0,
            assumed_probability: 0.5,
        }
    }
}

impl WeightedAverage {
    pub fn new(weight: f64, assumed_probability: f64) -> Result<Self, SmoothingError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(SmoothingError::Weight(weight));
        }
        if !(0.0..=1.0).contains(&assumed_probability) {
            return Err(SmoothingError::AssumedProbability(assumed_probability));
        }
        Ok(WeightedAverage {
            weight,
            assumed_probability,
        })
    }

    /// How many observations the assumed probability is worth.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn assumed_probability(&self) -> f64 {
        self.assumed_probability
    }

    /// Blends `basic` with the assumed probability given `totals` observations.
    pub fn blend(&self, basic: f64, totals: u64) -> f64 {
        let totals = totals as f64;
        (self.weight * self.assumed_probability + totals * basic) / (self.weight + totals)
    }
}

/// Smoothed `P(feature|category)`.
///
/// `raw_probability` replaces the store's own `P(feature|category)` when given;
/// the evidence volume still comes from the store.
pub fn weighted_average_probability<T, K>(
    store: &FrequencyStore<T, K>,
    feature: &T,
    category: &K,
    params: WeightedAverage,
    raw_probability: Option<f64>,
) -> f64
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone,
{
    let basic = raw_probability.unwrap_or_else(|| store.feature_probability(feature, category));
    params.blend(basic, store.feature_totals(feature))
}

/// Like [`weighted_average_probability`], with the raw probability taken from
/// `calculator`.
pub fn weighted_average_with<T, K, C>(
    store: &FrequencyStore<T, K>,
    feature: &T,
    category: &K,
    params: WeightedAverage,
    calculator: &C,
) -> f64
where
    T: Eq + Hash + Clone,
    K: Eq + Hash + Clone,
    C: FeatureProbability<T, K> + ?Sized,
{
    let basic = calculator.feature_probability(feature, category);
    params.blend(basic, store.feature_totals(feature))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn trained() -> FrequencyStore<&'static str, &'static str> {
        let mut store = FrequencyStore::new();
        for feature in ["I", "love", "sunny", "days"] {
            store.increment_feature(&feature, &"positive");
        }
        store.increment_category(&"positive");
        for feature in ["I", "hate", "rain"] {
            store.increment_feature(&feature, &"negative");
        }
        store.increment_category(&"negative");
        store
    }

    struct Fixed(f64);

    impl FeatureProbability<&'static str, &'static str> for Fixed {
        fn feature_probability(&self, _: &&'static str, _: &&'static str) -> f64 {
            self.0
        }
    }

    #[test]
    fn feature_probability_is_count_ratio() {
        let store = trained();
        assert!((store.feature_probability(&"sunny", &"positive") - 1.0).abs() < EPSILON);
        assert_eq!(store.feature_probability(&"sunny", &"negative"), 0.0);
    }

    #[test]
    fn feature_probability_of_unknown_category_is_zero() {
        let store = trained();
        assert_eq!(store.feature_probability(&"sunny", &"neutral"), 0.0);
    }

    #[test]
    fn weighted_average_matches_formula() {
        let store = trained();
        let params = WeightedAverage::default();

        // "sunny": basic 1.0, totals 1 -> (0.5 + 1.0) / 2
        let p = weighted_average_probability(&store, &"sunny", &"positive", params, None);
        assert!((p - 0.75).abs() < EPSILON);

        // "I": seen in both categories, basic 1.0, totals 2 -> (0.5 + 2.0) / 3
        let p = weighted_average_probability(&store, &"I", &"negative", params, None);
        assert!((p - 2.5 / 3.0).abs() < EPSILON);

        // "sunny" under "negative": basic 0.0, totals 1 -> 0.5 / 2
        let p = weighted_average_probability(&store, &"sunny", &"negative", params, None);
        assert!((p - 0.25).abs() < EPSILON);
    }

    #[test]
    fn unseen_feature_yields_assumed_probability() {
        let store = trained();
        let params = WeightedAverage::new(3.0, 0.2).unwrap();
        let p = weighted_average_probability(&store, &"tomorrow", &"positive", params, None);
        assert!((p - 0.2).abs() < EPSILON);
    }

    #[test]
    fn raw_probability_override_replaces_basic() {
        let store = trained();
        let params = WeightedAverage::default();
        let p = weighted_average_probability(&store, &"sunny", &"positive", params, Some(0.0));
        assert!((p - 0.25).abs() < EPSILON);

        let q = weighted_average_with(&store, &"sunny", &"positive", params, &Fixed(0.0));
        assert!((p - q).abs() < EPSILON);
    }

    #[test]
    fn duplicate_features_can_exceed_one() {
        let mut store = FrequencyStore::new();
        store.increment_feature(&"x", &"a");
        store.increment_feature(&"x", &"a");
        store.increment_category(&"a");
        assert!((store.feature_probability(&"x", &"a") - 2.0).abs() < EPSILON);
    }

    #[test]
    fn rejects_degenerate_smoothing() {
        assert_eq!(
            WeightedAverage::new(0.0, 0.5),
            Err(SmoothingError::Weight(0.0))
        );
        assert!(matches!(
            WeightedAverage::new(f64::NAN, 0.5),
            Err(SmoothingError::Weight(_))
        ));
        assert!(matches!(
            WeightedAverage::new(f64::INFINITY, 0.5),
            Err(SmoothingError::Weight(_))
        ));
        assert_eq!(
            WeightedAverage::new(1.0, 1.5),
            Err(SmoothingError::AssumedProbability(1.5))
        );
        assert!(WeightedAverage::new(1.0, f64::NAN).is_err());

        let params = WeightedAverage::new(2.0, 0.25).unwrap();
        assert_eq!(params.weight(), 2.0);
        assert_eq!(params.assumed_probability(), 0.25);
    }

    #[test]
    fn heavier_weight_pulls_toward_assumed() {
        let store = trained();
        let light = weighted_average_probability(
            &store,
            &"sunny",
            &"positive",
            WeightedAverage::new(1.0, 0.5).unwrap(),
            None,
        );
        let heavy = weighted_average_probability(
            &store,
            &"sunny",
            &"positive",
            WeightedAverage::new(10.0, 0.5).unwrap(),
            None,
        );
        assert!(heavy < light);
        assert!(heavy > 0.5);
    }
}
