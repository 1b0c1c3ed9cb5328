//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::statusbar::bar::FragmentStyle;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── listing pane ───────────────────────────────────────────
    pub fn dir_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn symlink_style() -> Style {
        Style::default().fg(Color::Magenta)
    }

    pub fn pointed_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn marked_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    // ── status-line fragments ──────────────────────────────────
    pub fn fragment_style(style: FragmentStyle) -> Style {
        match style {
            FragmentStyle::Plain => Style::default(),
            FragmentStyle::Good => Style::default().fg(Color::Green),
            FragmentStyle::Bad => Style::default().fg(Color::Red),
            FragmentStyle::Highlight => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            FragmentStyle::Space => Style::default().fg(Color::Gray),
            FragmentStyle::Marked => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            FragmentStyle::Scroll => Style::default().fg(Color::Cyan),
        }
    }
}
