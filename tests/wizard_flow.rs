//! End-to-end wizard flow against a tree trained on the sample fixture.

use std::path::PathBuf;

use medihealth::adapters::{load_training_table, DecisionTreeClassifier};
use medihealth::application::{AssessmentService, Screen, SubmitOutcome, Wizard};
use medihealth::domain::{Field, PatientRecord, Verdict};
use medihealth::ports::Classifier;
use medihealth::FeatureVector;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/heart_sample.csv")
}

fn trained_wizard() -> Wizard<DecisionTreeClassifier> {
    let table = load_training_table(&fixture_path()).expect("fixture loads");
    let classifier = DecisionTreeClassifier::train(&table).expect("Should fit");
    Wizard::new(AssessmentService::new(classifier))
}

fn fill_reference_patient(record: &mut PatientRecord) {
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
}

#[test]
fn test_fixture_loads_and_skips_zero_cholesterol() {
    let table = load_training_table(&fixture_path()).expect("fixture loads");
    assert_eq!(table.len(), 40);
    assert_eq!(table.skipped_rows(), 1);

    let (at_risk, clear) = table.class_counts();
    assert!(at_risk > 0 && clear > 0);
}

#[test]
fn test_full_cycle() {
    let mut wizard = trained_wizard();
    assert_eq!(*wizard.screen(), Screen::Intro);
    assert!(wizard.record_mut().is_none());

    assert!(wizard.start());
    assert_eq!(*wizard.screen(), Screen::Form);

    // Blank submit flags every field except oldpeak
    match wizard.submit().expect("Should submit") {
        SubmitOutcome::Incomplete(missing) => {
            assert_eq!(missing.len(), 10);
            assert!(!missing.contains(&Field::Oldpeak));
        }
        other => panic!("expected incomplete submit, got {other:?}"),
    }
    assert_eq!(*wizard.screen(), Screen::Form);
    assert!(wizard.is_flagged(Field::Age));

    wizard.focus(Field::Age);
    assert!(!wizard.is_flagged(Field::Age));

    fill_reference_patient(wizard.record_mut().expect("form is shown"));
    let outcome = wizard.submit().expect("Should submit");

    // The reference patient is in the fixture with label 0
    assert_eq!(outcome, SubmitOutcome::Assessed(Verdict::AtRisk));
    match wizard.screen() {
        Screen::Result(assessment) => {
            assert_eq!(assessment.verdict, Verdict::AtRisk);
            assert_eq!(
                assessment.features.to_string(),
                "[63, 0, 3, 145, 233, 1, 0, 150, 0, 2.3, 2]"
            );
        }
        other => panic!("expected result screen, got {other:?}"),
    }
    assert!(wizard.flagged().is_empty());

    assert!(wizard.restart());
    assert_eq!(*wizard.screen(), Screen::Form);
    assert_eq!(*wizard.record(), PatientRecord::new());
    assert_eq!(wizard.record().oldpeak, 0.0);
}

#[test]
fn test_prediction_is_deterministic() {
    let wizard = trained_wizard();
    let mut record = PatientRecord::new();
    fill_reference_patient(&mut record);
    let features = FeatureVector::encode(&record).expect("complete record");

    let classifier = wizard.service().classifier();
    let first = classifier.predict(&features).expect("Should predict");
    for _ in 0..5 {
        assert_eq!(classifier.predict(&features).expect("Should predict"), first);
    }
    assert!(first <= 1);
}

#[test]
fn test_unseen_complete_record_is_assessed() {
    let mut wizard = trained_wizard();
    wizard.start();

    let record = wizard.record_mut().expect("form is shown");
    fill_reference_patient(record);
    record.select(Field::StSlope, "Up-sloping").expect("valid option");
    record.set_oldpeak(0.0).expect("in range");

    let outcome = wizard.submit().expect("Should submit");
    assert!(matches!(outcome, SubmitOutcome::Assessed(_)));
}
