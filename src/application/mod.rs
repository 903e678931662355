//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the assessment use case and the screen flow around it.

mod assessment;
mod wizard;

pub use assessment::{AssessmentService, DIAGNOSTICS_TARGET};
pub use wizard::{Screen, SubmitOutcome, Wizard};
