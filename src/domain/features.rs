//! Encoded feature vector consumed by the classifier.

use super::patient::{Categorical, Field, PatientRecord};
use super::validation::unset_fields;

/// Number of predictor columns.
pub const FEATURE_COUNT: usize = 11;

/// Error raised when a record that still has sentinels is encoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot encode record with unset fields: {}", join_fields(.0))]
    Unset(Vec<Field>),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Eleven numeric features in training-column order.
///
/// Only produced from a record with no sentinel fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode a fully filled-in record.
    ///
    /// # Errors
    /// Returns `EncodeError::Unset` listing every field still at its sentinel.
    pub fn encode(record: &PatientRecord) -> Result<Self, EncodeError> {
        let unset = unset_fields(record);
        if !unset.is_empty() {
            return Err(EncodeError::Unset(unset));
        }

        let (
            Some(sex),
            Some(pain),
            Some(fasting),
            Some(ecg),
            Some(angina),
            Some(slope),
        ) = (
            record.sex,
            record.chest_pain,
            record.fasting_bs,
            record.resting_ecg,
            record.exercise_angina,
            record.st_slope,
        )
        else {
            return Err(EncodeError::Unset(unset_fields(record)));
        };

        Ok(Self([
            f64::from(record.age),
            f64::from(sex.code()),
            f64::from(pain.code()),
            f64::from(record.resting_bp),
            f64::from(record.cholesterol),
            f64::from(fasting.code()),
            f64::from(ecg.code()),
            f64::from(record.max_hr),
            f64::from(angina.code()),
            record.oldpeak,
            f64::from(slope.code()),
        ]))
    }

    /// Build a vector from raw values (e.g. a dataset row).
    #[must_use]
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> f64 {
        self.0[field.index()]
    }
}

impl std::fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// Dataset column names in feature order.
#[must_use]
pub fn feature_columns() -> [&'static str; FEATURE_COUNT] {
    Field::ALL.map(Field::column)
}
