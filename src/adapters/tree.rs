//! Decision-tree adapter: Implementation of Classifier using linfa-trees.
//!
//! The tree is fitted once at startup with the library's default
//! hyperparameters (Gini impurity, no depth limit, no pruning) and is
//! read-only afterwards.

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::dataset::TrainingTable;
use crate::domain::{FeatureVector, FEATURE_COUNT};
use crate::ports::{Classifier, ClassifierError};

/// Error type for model fitting and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("Decision tree fit failed: {0}")]
    Fit(String),

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),

    #[error("Train ratio {0} must be strictly between 0 and 1")]
    InvalidRatio(f32),
}

/// Decision-tree classifier trained on the heart-disease table.
pub struct DecisionTreeClassifier {
    model: DecisionTree<f64, usize>,
    training_rows: usize,
}

impl DecisionTreeClassifier {
    /// Fit a tree on every row of `table`.
    ///
    /// # Errors
    /// Returns `TrainingError::Fit` if linfa rejects the data.
    pub fn train(table: &TrainingTable) -> Result<Self, TrainingError> {
        tracing::info!("Fitting decision tree on {} rows...", table.len());

        let model = fit_tree(&table.to_dataset())?;

        tracing::info!("Decision tree ready");
        Ok(Self {
            model,
            training_rows: table.len(),
        })
    }

    /// Number of rows the tree was fitted on.
    #[must_use]
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }
}

impl Classifier for DecisionTreeClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        let row = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| ClassifierError::Shape(e.to_string()))?;
        let labels: Array1<usize> = self.model.predict(&row);
        labels.first().copied().ok_or(ClassifierError::EmptyPrediction)
    }
}

fn fit_tree(
    dataset: &Dataset<f64, usize, ndarray::Ix1>,
) -> Result<DecisionTree<f64, usize>, TrainingError> {
    DecisionTree::params()
        .fit(dataset)
        .map_err(|e| TrainingError::Fit(e.to_string()))
}

/// Hold-out quality report for a freshly fitted tree.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// Fraction of hold-out rows predicted correctly (0.0 to 1.0)
    pub accuracy: f32,
    /// Precision and recall as reported by the confusion matrix
    pub precision: f32,
    pub recall: f32,
    /// Rendered confusion matrix
    pub confusion: String,
}

/// Shuffle `table`, fit on the first `train_ratio` of rows and score the rest.
///
/// This is a development-time check; the application itself never evaluates.
///
/// # Errors
/// Returns `TrainingError` if the ratio is out of range or fitting/scoring fails.
pub fn evaluate_holdout(
    table: &TrainingTable,
    train_ratio: f32,
    seed: u64,
) -> Result<EvaluationReport, TrainingError> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(TrainingError::InvalidRatio(train_ratio));
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (train, valid) = table
        .to_dataset()
        .shuffle(&mut rng)
        .split_with_ratio(train_ratio);

    if train.records().nrows() == 0 || valid.records().nrows() == 0 {
        return Err(TrainingError::Evaluation(format!(
            "split of {} rows left an empty partition",
            table.len()
        )));
    }

    let model = fit_tree(&train)?;
    let predictions: Array1<usize> = model.predict(valid.records());
    let cm = predictions
        .confusion_matrix(&valid)
        .map_err(|e| TrainingError::Evaluation(e.to_string()))?;

    Ok(EvaluationReport {
        train_rows: train.records().nrows(),
        test_rows: valid.records().nrows(),
        accuracy: cm.accuracy(),
        precision: cm.precision(),
        recall: cm.recall(),
        confusion: format!("{cm:?}"),
    })
}
