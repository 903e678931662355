//! Main TUI application state machine.
//!
//! Handles:
//! - Screen rendering for the wizard
//! - Input event handling
//! - Composition of dataset, classifier and assessment service

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::DecisionTreeClassifier;
use crate::application::{Screen, SubmitOutcome, Wizard};
use crate::config::AppConfig;
use crate::domain::Field;
use crate::{bootstrap, MediHealthError};

use super::ui::{
    form::{render_patient_form, PatientFormState},
    intro::render_intro,
    render_disclaimer,
    result::render_result,
};

/// Main application state
pub struct App {
    /// Screen state machine, record and classifier
    wizard: Wizard<DecisionTreeClassifier>,

    /// Focus and edit buffer of the form
    form_state: PatientFormState,

    /// Training table the classifier was fitted on (shown on the intro screen)
    dataset_path: PathBuf,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Load the dataset, train the classifier and build the wizard.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be read or the tree cannot be fitted.
    /// Nothing is drawn in that case.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let wizard = bootstrap(config).with_context(|| {
            format!(
                "Startup failed for training data {:?}. Set MEDIHEALTH_DATASET_PATH to a valid heart.csv.",
                config.dataset_path
            )
        })?;

        Ok(Self::with_dependencies(wizard, config.dataset_path.clone()))
    }

    /// Create application around an already built wizard.
    #[must_use]
    pub fn with_dependencies(wizard: Wizard<DecisionTreeClassifier>, dataset_path: PathBuf) -> Self {
        Self {
            wizard,
            form_state: PatientFormState::default(),
            dataset_path,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// The terminal is restored before any error is returned.
    ///
    /// # Errors
    /// Returns error if terminal operations fail or a prediction is broken.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.wizard.screen() {
                    Screen::Intro => render_intro(
                        f,
                        content_area,
                        self.wizard.service().classifier().training_rows(),
                        &self.dataset_path,
                    ),
                    Screen::Form => render_patient_form(
                        f,
                        content_area,
                        &self.form_state,
                        self.wizard.record(),
                        &|field: Field| self.wizard.is_flagged(field),
                    ),
                    Screen::Result(assessment) => render_result(f, content_area, assessment),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers)?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.wizard.screen() {
            Screen::Intro => self.handle_intro_key(key),
            Screen::Form => self.handle_form_key(key)?,
            Screen::Result(_) => self.handle_result_key(key),
        }
        Ok(())
    }

    fn handle_intro_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state = PatientFormState::default();
                self.wizard.start();
                self.wizard.focus(self.form_state.selected());
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Up | KeyCode::BackTab => {
                let field = self.form_state.prev_field();
                self.wizard.focus(field);
            }
            KeyCode::Down | KeyCode::Tab => {
                let field = self.form_state.next_field();
                self.wizard.focus(field);
            }
            KeyCode::Enter => self.submit_patient_form()?,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {
                let Some(record) = self.wizard.record_mut() else {
                    return Ok(());
                };
                match key {
                    KeyCode::Left => self.form_state.step(record, false),
                    KeyCode::Right => self.form_state.step(record, true),
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        if let Err(e) = self.form_state.load_sample_data(record) {
                            self.form_state.error_message = Some(e.to_string());
                        }
                        let flagged: Vec<_> = self.wizard.flagged().iter().copied().collect();
                        for field in flagged {
                            self.wizard.focus(field);
                        }
                        return Ok(());
                    }
                    KeyCode::Char(c) => self.form_state.input_char(record, c),
                    KeyCode::Backspace => self.form_state.delete_char(record),
                    KeyCode::Delete => self.form_state.clear_field(record),
                    _ => return Ok(()),
                }
                self.wizard.focus(self.form_state.selected());
            }
        }
        Ok(())
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                self.form_state.clear_sensitive();
                self.wizard.restart();
                self.wizard.focus(self.form_state.selected());
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) -> Result<()> {
        let outcome = self.wizard.submit().map_err(prediction_failure)?;

        match outcome {
            SubmitOutcome::Incomplete(missing) => {
                self.form_state.error_message = Some(format!(
                    "{} required field(s) missing",
                    missing.len()
                ));
            }
            SubmitOutcome::Assessed(verdict) => {
                tracing::info!("Assessment complete: {}", verdict);
                self.form_state.clear_sensitive();
            }
            SubmitOutcome::Ignored => {}
        }
        Ok(())
    }
}

/// Wrap a failed submit as a fatal application error.
fn prediction_failure(err: MediHealthError) -> anyhow::Error {
    anyhow::Error::new(err).context("Prediction pipeline is inconsistent")
}

/// Label carried by a broken-prediction error, looking through any context.
#[must_use]
pub fn broken_prediction_label(err: &anyhow::Error) -> Option<usize> {
    match err.downcast_ref::<MediHealthError>() {
        Some(MediHealthError::BrokenPrediction(label)) => Some(*label),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AssessmentService;
    use crate::domain::{FeatureVector, Verdict};
    use crate::ports::{Classifier, ClassifierError};

    fn fixture_config() -> AppConfig {
        AppConfig {
            dataset_path: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests/fixtures/heart_sample.csv"),
            ..AppConfig::default()
        }
    }

    /// Always answers with the same raw label.
    struct FixedLabel(usize);

    impl Classifier for FixedLabel {
        fn predict(&self, _features: &FeatureVector) -> std::result::Result<usize, ClassifierError> {
            Ok(self.0)
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE).expect("key handled");
    }

    #[test]
    fn test_new_fails_on_missing_dataset() {
        let config = AppConfig {
            dataset_path: PathBuf::from("/nonexistent.csv"),
            ..AppConfig::default()
        };

        let err = App::new(&config).err().expect("missing dataset must abort startup");
        assert!(matches!(
            err.downcast_ref::<MediHealthError>(),
            Some(MediHealthError::Dataset(_))
        ));
        assert_eq!(broken_prediction_label(&err), None);
    }

    #[test]
    fn test_broken_prediction_survives_context() {
        let mut wizard = Wizard::new(AssessmentService::new(FixedLabel(7)));
        wizard.start();
        let mut form = PatientFormState::default();
        form.load_sample_data(wizard.record_mut().expect("form is shown"))
            .expect("sample fits");

        let err = wizard.submit().err().expect("label 7 is broken");
        let err = prediction_failure(err);

        assert_eq!(broken_prediction_label(&err), Some(7));
        assert!(format!("{err:#}").contains("BROKEN PREDICTION"));
    }

    #[test]
    fn test_keyboard_cycle_on_fixture() {
        let config = fixture_config();
        let mut app = App::new(&config).expect("Should start");
        assert_eq!(*app.wizard.screen(), Screen::Intro);

        press(&mut app, KeyCode::Enter);
        assert_eq!(*app.wizard.screen(), Screen::Form);

        // Blank submit stays on the form with every field but oldpeak flagged
        press(&mut app, KeyCode::Enter);
        assert_eq!(*app.wizard.screen(), Screen::Form);
        assert_eq!(app.wizard.flagged().len(), 10);
        assert!(app.form_state.error_message.is_some());

        press(&mut app, KeyCode::Char('s'));
        assert!(app.wizard.flagged().is_empty());

        press(&mut app, KeyCode::Enter);
        match app.wizard.screen() {
            Screen::Result(assessment) => assert_eq!(assessment.verdict, Verdict::AtRisk),
            other => panic!("expected result screen, got {other:?}"),
        }

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(*app.wizard.screen(), Screen::Form);
        assert!(app.wizard.record().is_unset(Field::Age));

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL)
            .expect("key handled");
        assert!(app.should_quit);
    }
}
