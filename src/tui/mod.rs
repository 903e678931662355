//! TUI module: Terminal User Interface using Ratatui.
//!
//! Three screens, one raised at a time:
//! - Intro with the start action
//! - Patient data entry form
//! - Risk verdict with the restart action

mod app;
mod styles;
mod ui;

pub use app::{broken_prediction_label, App};
pub use styles::MedicalTheme;
pub use ui::form::PatientFormState;
