//! # MediHealth
//!
//! Heart-disease risk wizard backed by a decision-tree classifier.
//!
//! This crate provides:
//! - A patient record with sentinel-aware validation and feature encoding
//! - A decision tree trained once at startup on the bundled dataset
//! - Terminal UI walking the user through intro, data entry and result
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, FeatureVector, Verdict)
//! - `ports`: Trait definitions for external operations (Classifier)
//! - `adapters`: Concrete implementations (csv dataset, linfa-trees)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use bootstrap::bootstrap;
pub use config::AppConfig;
pub use domain::{Assessment, FeatureVector, Field, PatientRecord, Verdict};

/// Result type for MediHealth operations
pub type Result<T> = std::result::Result<T, MediHealthError>;

/// Main error type for MediHealth
#[derive(Debug, thiserror::Error)]
pub enum MediHealthError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] adapters::DatasetError),

    #[error("Training error: {0}")]
    Training(#[from] adapters::TrainingError),

    #[error("Encoding error: {0}")]
    Encode(#[from] domain::EncodeError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("BROKEN PREDICTION: classifier returned label {0}, expected 0 or 1")]
    BrokenPrediction(usize),
}
