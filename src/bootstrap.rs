//! Startup sequence: training table, decision tree and wizard, in that order.

use crate::adapters::{load_training_table, DecisionTreeClassifier};
use crate::application::{AssessmentService, Wizard};
use crate::config::AppConfig;

/// Load the training table, fit the tree and build a wizard on its intro screen.
///
/// Nothing interactive exists until this returns `Ok`.
///
/// # Errors
/// Returns `MediHealthError::Dataset` if the table is missing or malformed and
/// `MediHealthError::Training` if the tree cannot be fitted.
pub fn bootstrap(config: &AppConfig) -> crate::Result<Wizard<DecisionTreeClassifier>> {
    let table = load_training_table(&config.dataset_path)?;
    let classifier = DecisionTreeClassifier::train(&table)?;
    let service = AssessmentService::new(classifier).with_diagnostics(config.diagnostics);

    Ok(Wizard::new(service))
}
