//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{Field, FieldKind, FormError, PatientRecord, PLACEHOLDER};
use crate::tui::styles::MedicalTheme;

/// Patient form state.
///
/// The record itself lives in the wizard; this only tracks focus and the
/// text being typed into the focused numeric field.
#[derive(Debug, Default)]
pub struct PatientFormState {
    selected_field: usize,
    draft: String,
    pub error_message: Option<String>,
}

impl PatientFormState {
    #[must_use]
    pub fn selected(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    /// Text typed so far into the focused field (empty when not editing).
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Move to the next field and return it.
    pub fn next_field(&mut self) -> Field {
        self.selected_field = (self.selected_field + 1) % Field::ALL.len();
        self.end_edit();
        self.selected()
    }

    /// Move to the previous field and return it.
    pub fn prev_field(&mut self) -> Field {
        if self.selected_field == 0 {
            self.selected_field = Field::ALL.len() - 1;
        } else {
            self.selected_field -= 1;
        }
        self.end_edit();
        self.selected()
    }

    /// Type a character into the focused field.
    ///
    /// Numeric fields accept digits (plus `.` and `-` for oldpeak) and store
    /// the value as soon as the buffer parses. Space cycles a choice field.
    pub fn input_char(&mut self, record: &mut PatientRecord, c: char) {
        let field = self.selected();
        match field.kind() {
            FieldKind::Integer { .. } if c.is_ascii_digit() => {
                self.draft.push(c);
                self.apply_draft(record, field);
            }
            FieldKind::Decimal { .. } if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.draft.push(c);
                self.apply_draft(record, field);
            }
            FieldKind::Choice if c == ' ' => self.step(record, true),
            _ => {}
        }
    }

    /// Delete the last typed character.
    pub fn delete_char(&mut self, record: &mut PatientRecord) {
        let field = self.selected();
        if field.kind() == FieldKind::Choice {
            self.clear_field(record);
            return;
        }
        if self.draft.is_empty() && !record.is_unset(field) {
            self.draft = record.display_value(field);
        }
        self.draft.pop();
        self.apply_draft(record, field);
    }

    /// Put the focused field back to its sentinel.
    pub fn clear_field(&mut self, record: &mut PatientRecord) {
        record.clear(self.selected());
        self.end_edit();
    }

    /// Spin-box increment/decrement or option cycling.
    pub fn step(&mut self, record: &mut PatientRecord, forward: bool) {
        record.step(self.selected(), forward);
        self.end_edit();
    }

    /// Wipe the edit buffer from memory and reset focus.
    pub fn clear_sensitive(&mut self) {
        self.draft.zeroize();
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Load sample data for testing (63yo male, asymptomatic chest pain).
    ///
    /// # Errors
    /// Returns `FormError` if a sample value does not fit its field.
    pub fn load_sample_data(&mut self, record: &mut PatientRecord) -> Result<(), FormError> {
        record.set_integer(Field::Age, 63)?;
        record.select(Field::Sex, "Male")?;
        record.select(Field::ChestPain, "Asymptomatic")?;
        record.set_integer(Field::RestingBp, 145)?;
        record.set_integer(Field::Cholesterol, 233)?;
        record.select(Field::FastingBs, "Yes")?;
        record.select(Field::RestingEcg, "Normal")?;
        record.set_integer(Field::MaxHr, 150)?;
        record.select(Field::ExerciseAngina, "No")?;
        record.set_oldpeak(2.3)?;
        record.select(Field::StSlope, "Down-sloping")?;
        self.end_edit();
        Ok(())
    }

    fn end_edit(&mut self) {
        self.draft.zeroize();
        self.error_message = None;
    }

    fn apply_draft(&mut self, record: &mut PatientRecord, field: Field) {
        self.error_message = None;
        if self.draft.is_empty() {
            record.clear(field);
            return;
        }

        let result = match field.kind() {
            FieldKind::Integer { .. } => match self.draft.parse::<u16>() {
                Ok(value) => record.set_integer(field, value).map_err(|e| e.to_string()),
                Err(_) => Err(format!("{field}: number too large")),
            },
            FieldKind::Decimal { .. } => {
                // "-", "." and "1." are still being typed
                if self.draft.ends_with('.') || self.draft == "-" {
                    return;
                }
                match self.draft.parse::<f64>() {
                    Ok(value) => record.set_oldpeak(value).map_err(|e| e.to_string()),
                    Err(_) => Err(format!("{field}: invalid number")),
                }
            }
            FieldKind::Choice => Ok(()),
        };

        if let Err(message) = result {
            self.draft.pop();
            self.error_message = Some(message);
        }
    }
}

/// Render the patient data input form
pub fn render_patient_form(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    record: &PatientRecord,
    is_flagged: &dyn Fn(Field) -> bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state, record, is_flagged);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Patient Data Entry", MedicalTheme::title()),
        Span::styled(" │ All fields are required", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    record: &PatientRecord,
    is_flagged: &dyn Fn(Field) -> bool,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (Field::ALL.len() + 1) / 2;

    render_field_column(f, columns[0], &Field::ALL[..mid], state, record, is_flagged);
    render_field_column(f, columns[1], &Field::ALL[mid..], state, record, is_flagged);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[Field],
    state: &PatientFormState,
    record: &PatientRecord,
    is_flagged: &dyn Fn(Field) -> bool,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, &field) in fields.iter().enumerate() {
        let is_selected = field == state.selected();
        let flagged = is_flagged(field);

        let border_style = if flagged {
            MedicalTheme::danger()
        } else if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if flagged {
            MedicalTheme::flagged()
        } else if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.prompt()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(value_line(field, is_selected, state, record)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn value_line<'a>(
    field: Field,
    is_selected: bool,
    state: &'a PatientFormState,
    record: &PatientRecord,
) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")];

    match field.kind() {
        FieldKind::Choice => {
            let value = match record.selection(field) {
                Some(label) => Span::styled(label, MedicalTheme::text()),
                None => Span::styled(PLACEHOLDER, MedicalTheme::text_muted()),
            };
            if is_selected {
                spans.push(Span::styled("◀ ", MedicalTheme::cursor()));
                spans.push(value);
                spans.push(Span::styled(" ▶", MedicalTheme::cursor()));
            } else {
                spans.push(value);
            }
        }
        FieldKind::Integer { max } => {
            if is_selected && !state.draft().is_empty() {
                spans.push(Span::styled(state.draft(), MedicalTheme::text()));
            } else if record.is_unset(field) {
                spans.push(Span::styled(
                    format!("0 (0-{max})"),
                    MedicalTheme::text_muted(),
                ));
            } else {
                spans.push(Span::styled(record.display_value(field), MedicalTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", MedicalTheme::cursor()));
            }
        }
        FieldKind::Decimal { min, max, step } => {
            if is_selected && !state.draft().is_empty() {
                spans.push(Span::styled(state.draft(), MedicalTheme::text()));
            } else {
                spans.push(Span::styled(record.display_value(field), MedicalTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", MedicalTheme::cursor()));
                spans.push(Span::styled(
                    format!("  ({min} to {max}, step {step})"),
                    MedicalTheme::text_muted(),
                ));
            }
        }
    }

    Line::from(spans)
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Change ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Submit ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
