//! Assessment service: Runs one patient record through the classifier.
//!
//! This service coordinates:
//! - Feature encoding
//! - Prediction
//! - Verdict interpretation
//! - The optional diagnostic trace of features and raw label

use crate::domain::{Assessment, FeatureVector, PatientRecord, Verdict};
use crate::ports::Classifier;
use crate::MediHealthError;

/// Log target for the feature/label diagnostic trace.
pub const DIAGNOSTICS_TARGET: &str = "medihealth::diagnostics";

/// Service that turns a completed record into a verdict.
///
/// Owns the trained classifier for the lifetime of the process.
pub struct AssessmentService<C: Classifier> {
    classifier: C,
    diagnostics: bool,
}

impl<C: Classifier> AssessmentService<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            diagnostics: false,
        }
    }

    /// Emit every encoded feature vector and raw label at `info` instead of `debug`.
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Encode `record`, predict and interpret the label.
    ///
    /// # Errors
    /// - `MediHealthError::Encode` if the record still has unset fields
    /// - `MediHealthError::Classifier` if the model rejects the row
    /// - `MediHealthError::BrokenPrediction` if the label is neither 0 nor 1
    pub fn assess(&self, record: &PatientRecord) -> Result<Assessment, MediHealthError> {
        let features = FeatureVector::encode(record)?;
        let label = self.classifier.predict(&features)?;

        if self.diagnostics {
            tracing::info!(target: DIAGNOSTICS_TARGET, "features={} prediction={}", features, label);
        } else {
            tracing::debug!(target: DIAGNOSTICS_TARGET, "features={} prediction={}", features, label);
        }

        let verdict = Verdict::from_label(label).ok_or(MediHealthError::BrokenPrediction(label))?;
        tracing::info!("Assessment complete: verdict={}", verdict);

        Ok(Assessment::new(verdict, features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;
    use crate::ports::ClassifierError;
    use std::cell::Cell;

    struct FixedClassifier {
        label: usize,
        calls: Cell<usize>,
        last: Cell<Option<FeatureVector>>,
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
            self.calls.set(self.calls.get() + 1);
            self.last.set(Some(*features));
            Ok(self.label)
        }
    }

    fn fixed(label: usize) -> FixedClassifier {
        FixedClassifier {
            label,
            calls: Cell::new(0),
            last: Cell::new(None),
        }
    }

    fn complete_record() -> PatientRecord {
        let mut record = PatientRecord::new();
        record.set_integer(Field::Age, 63).expect("in range");
        record.select(Field::Sex, "Male").expect("valid option");
        record.select(Field::ChestPain, "Asymptomatic").expect("valid option");
        record.set_integer(Field::RestingBp, 145).expect("in range");
        record.set_integer(Field::Cholesterol, 233).expect("in range");
        record.select(Field::FastingBs, "Yes").expect("valid option");
        record.select(Field::RestingEcg, "Normal").expect("valid option");
        record.set_integer(Field::MaxHr, 150).expect("in range");
        record.select(Field::ExerciseAngina, "No").expect("valid option");
        record.set_oldpeak(2.3).expect("in range");
        record.select(Field::StSlope, "Down-sloping").expect("valid option");
        record
    }

    #[test]
    fn test_assess_maps_labels() {
        let service = AssessmentService::new(fixed(0));
        let assessment = service.assess(&complete_record()).expect("Should assess");
        assert_eq!(assessment.verdict, Verdict::AtRisk);

        let service = AssessmentService::new(fixed(1)).with_diagnostics(true);
        let assessment = service.assess(&complete_record()).expect("Should assess");
        assert_eq!(assessment.verdict, Verdict::Clear);
    }

    #[test]
    fn test_assess_passes_encoded_features() {
        let service = AssessmentService::new(fixed(1));
        let assessment = service.assess(&complete_record()).expect("Should assess");

        let seen = service.classifier().last.get().expect("classifier was called");
        assert_eq!(seen, assessment.features);
        assert_eq!(
            seen.as_slice(),
            &[63.0, 0.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 2.0]
        );
    }

    #[test]
    fn test_incomplete_record_never_reaches_classifier() {
        let service = AssessmentService::new(fixed(1));
        let err = service.assess(&PatientRecord::new()).expect_err("Should fail");
        assert!(matches!(err, MediHealthError::Encode(_)));
        assert_eq!(service.classifier().calls.get(), 0);
    }

    #[test]
    fn test_out_of_range_label_is_broken_prediction() {
        let service = AssessmentService::new(fixed(5));
        let err = service.assess(&complete_record()).expect_err("Should fail");
        assert!(matches!(err, MediHealthError::BrokenPrediction(5)));
    }
}
