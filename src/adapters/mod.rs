//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `dataset`: csv + serde for the bundled training table
//! - `tree`: linfa-trees for the decision-tree classifier

pub mod dataset;
pub mod tree;

pub use dataset::{load_training_table, read_training_table, DatasetError, TrainingTable};
pub use tree::{evaluate_holdout, DecisionTreeClassifier, EvaluationReport, TrainingError};
