//! Intro view: Landing screen with the start action.

use std::path::Path;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::{MedicalTheme, LOGO};

/// Render the landing screen.
pub fn render_intro(f: &mut Frame, area: Rect, training_rows: usize, dataset: &Path) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title
            Constraint::Min(0),    // Logo
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_logo(f, chunks[1], training_rows, dataset);
    render_intro_footer(f, chunks[2]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Heart Disease", MedicalTheme::title())),
        Line::from(Span::styled("Are You At Risk?", MedicalTheme::subtitle())),
    ])
    .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_logo(f: &mut Frame, area: Rect, training_rows: usize, dataset: &Path) {
    let mut lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, MedicalTheme::danger())))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Model trained on ", MedicalTheme::text_muted()),
        Span::styled(training_rows.to_string(), MedicalTheme::text_secondary()),
        Span::styled(
            format!(" records from {}", dataset.display()),
            MedicalTheme::text_muted(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "The bundled table is synthetic demonstration data",
        MedicalTheme::text_muted(),
    )));

    let logo = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(logo, area);
}

fn render_intro_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Start ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
