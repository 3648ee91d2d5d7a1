//! An online-trainable naive Bayes classifier over discrete features.
//!
//! ```
//! use bayes_classifier::NaiveBayesClassifier;
//!
//! let mut bayes = NaiveBayesClassifier::new();
//! bayes.train("positive", &["I", "love", "sunny", "days"]);
//! bayes.train("negative", &["I", "hate", "rain"]);
//!
//! let result = bayes.classify(&["there", "will", "be", "rain"]).unwrap();
//! assert_eq!(result.category, "negative");
//! ```

pub mod bayes;
pub mod classification;
pub mod command;
pub mod dataset;
pub mod probability;
pub mod shared;
pub mod store;

pub use bayes::{Classifier, NaiveBayesClassifier};
pub use classification::Classification;
pub use probability::{FeatureProbability, SmoothingError, WeightedAverage};
pub use shared::SharedClassifier;
pub use store::FrequencyStore;
