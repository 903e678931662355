//! Result view: Risk verdict for the submitted record.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Assessment, Field, Verdict};
use crate::tui::styles::MedicalTheme;

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Verdict
            Constraint::Min(0),    // Features
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    render_verdict(f, chunks[1], assessment.verdict);
    render_features(f, chunks[2], assessment);
    render_result_footer(f, chunks[3]);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Results", MedicalTheme::title()),
        Span::styled(" │ Decision tree verdict", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn glyph(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Clear => "✔",
        Verdict::AtRisk => "⚠",
    }
}

fn render_verdict(f: &mut Frame, area: Rect, verdict: Verdict) {
    let style = MedicalTheme::verdict(verdict);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            glyph(verdict),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            verdict.headline(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(verdict.description(), MedicalTheme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );

    f.render_widget(content, area);
}

fn render_features(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let mut lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            Line::from(vec![
                Span::styled(format!("  {:<16}", field.column()), MedicalTheme::text_secondary()),
                Span::styled(
                    format_feature(assessment.features.get(field)),
                    MedicalTheme::text(),
                ),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Assessed: ", MedicalTheme::text_muted()),
        Span::styled(
            assessment
                .assessed_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            MedicalTheme::text_muted(),
        ),
    ]));

    let content = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Encoded Features ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn format_feature(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("↺ Restart ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
