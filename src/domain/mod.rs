//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the patient record edited by the form, the
//! completeness check, the feature encoder and the prediction outcome.

mod diagnosis;
mod features;
mod patient;
pub mod validation;

pub use diagnosis::{Assessment, Verdict};
pub use features::{feature_columns, EncodeError, FeatureVector, FEATURE_COUNT};
pub use patient::{
    Categorical, ChestPain, Field, FieldKind, FormError, PatientRecord, RestingEcg, Sex, StSlope,
    YesNo, PLACEHOLDER,
};
