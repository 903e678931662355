//! Completeness check run when the form is submitted.

use super::patient::{Field, PatientRecord};

/// Fields of `record` that still hold their sentinel, in column order.
///
/// Oldpeak is never reported: `0.0` is an accepted measurement.
#[must_use]
pub fn unset_fields(record: &PatientRecord) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| record.is_unset(*field))
        .collect()
}
