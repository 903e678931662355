//! Wizard controller: The Intro -> Form -> Result state machine.
//!
//! Owns the single patient record and the assessment service. The TUI only
//! renders what this controller exposes and forwards user actions to it.

use std::collections::BTreeSet;

use crate::domain::{validation, Assessment, Field, PatientRecord, Verdict};
use crate::ports::Classifier;
use crate::MediHealthError;

use super::AssessmentService;

/// Screen currently raised.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Intro,
    Form,
    Result(Assessment),
}

/// What happened when the user pressed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Fields still at their sentinel; they are now flagged.
    Incomplete(Vec<Field>),
    /// Prediction ran and the result screen is up.
    Assessed(Verdict),
    /// Submit outside the form screen has no effect.
    Ignored,
}

pub struct Wizard<C: Classifier> {
    screen: Screen,
    record: PatientRecord,
    flagged: BTreeSet<Field>,
    service: AssessmentService<C>,
}

impl<C: Classifier> Wizard<C> {
    /// Start on the intro screen with a blank record.
    pub fn new(service: AssessmentService<C>) -> Self {
        Self {
            screen: Screen::Intro,
            record: PatientRecord::new(),
            flagged: BTreeSet::new(),
            service,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Mutable access to the record, only while the form is shown.
    pub fn record_mut(&mut self) -> Option<&mut PatientRecord> {
        match self.screen {
            Screen::Form => Some(&mut self.record),
            _ => None,
        }
    }

    #[must_use]
    pub fn service(&self) -> &AssessmentService<C> {
        &self.service
    }

    /// Fields highlighted as missing after the last failed submit.
    #[must_use]
    pub fn flagged(&self) -> &BTreeSet<Field> {
        &self.flagged
    }

    #[must_use]
    pub fn is_flagged(&self, field: Field) -> bool {
        self.flagged.contains(&field)
    }

    /// Intro -> Form. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.screen != Screen::Intro {
            return false;
        }
        self.flagged.clear();
        self.screen = Screen::Form;
        tracing::debug!("Wizard: intro -> form");
        true
    }

    /// Focusing a field clears its missing-value highlight.
    pub fn focus(&mut self, field: Field) {
        self.flagged.remove(&field);
    }

    /// Validate the form and, if complete, predict and raise the result screen.
    ///
    /// # Errors
    /// Returns `MediHealthError::BrokenPrediction` (or an encode/classifier error)
    /// when the prediction pipeline is inconsistent. The caller must treat this as fatal.
    pub fn submit(&mut self) -> Result<SubmitOutcome, MediHealthError> {
        if self.screen != Screen::Form {
            return Ok(SubmitOutcome::Ignored);
        }

        let unset = validation::unset_fields(&self.record);
        self.flagged = unset.iter().copied().collect();
        if !unset.is_empty() {
            tracing::debug!("Submit rejected: {} fields unset", unset.len());
            return Ok(SubmitOutcome::Incomplete(unset));
        }

        let assessment = self.service.assess(&self.record)?;
        let verdict = assessment.verdict;
        self.screen = Screen::Result(assessment);
        tracing::debug!("Wizard: form -> result");
        Ok(SubmitOutcome::Assessed(verdict))
    }

    /// Result -> Form, discarding the previous record. Returns whether the transition happened.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.screen, Screen::Result(_)) {
            return false;
        }
        self.record.reset();
        self.flagged.clear();
        self.screen = Screen::Form;
        tracing::debug!("Wizard: result -> form");
        true
    }
}
