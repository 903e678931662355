//! Medical-themed color palette and styles.
//!
//! Colors chosen for:
//! - Professional healthcare appearance
//! - High contrast for accessibility

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Verdict;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Deep teal - Primary color (trust, medical)
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Rose - Error/missing field
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for danger/error messages
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for a required field left unset on submit
    #[must_use]
    pub fn flagged() -> Style {
        Style::default()
            .fg(Self::DANGER)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for the cursor in the focused input
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Get verdict style
    #[must_use]
    pub fn verdict(verdict: Verdict) -> Style {
        let (r, g, b) = verdict.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }
}

/// ASCII art logo for the intro screen
pub const LOGO: &str = r"
   ****     ****
 ******** ********
 *****************
  ***************
    ***********
      *******
        ***
";
