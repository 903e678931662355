//! Classifier port: Trait for the trained prediction model.
//!
//! This trait abstracts the tree library (linfa-trees) from the application logic,
//! so the controller can be driven by any model that maps one encoded feature
//! row to one label.

use crate::domain::FeatureVector;

/// Error type for classifier operations.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Invalid feature shape: {0}")]
    Shape(String),

    #[error("Classifier returned no prediction")]
    EmptyPrediction,
}

/// A trained, read-only binary classifier.
pub trait Classifier {
    /// Predict the raw label for one encoded feature row.
    ///
    /// The label is returned unchecked; interpreting it (and rejecting labels
    /// outside the two known outcomes) is the caller's job.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the row cannot be fed to the model.
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError>;
}
