//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use super::surface::Rgb;

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── background effect ──────────────────────────────────────
    pub const BACKGROUND: Rgb = Rgb(12, 12, 16);
    pub const NEON: Rgb = Rgb(255, 128, 0);
    pub const GRID_ALPHA: f64 = 0.12;
    pub const GLOW_ALPHA: f64 = 0.35;
    pub const TRAIL_ALPHA: f64 = 0.6;
    pub const NODE_ALPHA: f64 = 0.85;

    /// How much of the background shows through the profile card.
    pub const CARD_SHADE: f64 = 0.55;

    // ── profile card ───────────────────────────────────────────
    pub fn name_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style() -> Style {
        Style::default()
            .fg(Color::Rgb(249, 115, 22))
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Rgb(251, 146, 60))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn active_border_style() -> Style {
        Style::default().fg(Color::Rgb(249, 115, 22))
    }

    pub fn address_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selected_address_style() -> Style {
        Style::default()
            .fg(Color::Rgb(251, 146, 60))
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn copied_style() -> Style {
        Style::default().fg(Color::Rgb(74, 222, 128))
    }

    pub fn badge_style() -> Style {
        Style::default()
            .bg(Color::Rgb(74, 222, 128))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
