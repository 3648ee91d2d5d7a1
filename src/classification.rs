use std::fmt;

/// The outcome of classifying one feature set against one category.
///
/// `probability` is the unnormalized posterior score `P(category) * PROD(P(feature|category))`,
/// so it only means something relative to the scores of other categories for
/// the same features.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<T, K> {
    pub features: Vec<T>,
    pub category: K,
    pub probability: f64,
}

impl<T, K> Classification<T, K> {
    pub fn new(features: Vec<T>, category: K, probability: f64) -> Self {
        Classification {
            features,
            category,
            probability,
        }
    }
}

impl<T: fmt::Debug, K: fmt::Display> fmt::Display for Classification<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} -> {} ({:.7})",
            self.features, self.category, self.probability
        )
    }
}
