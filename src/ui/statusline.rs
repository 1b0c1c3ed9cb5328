//! The terminal-facing sink for the status-line engine.
//!
//! Paints a fragment sequence into one buffer row, left to right from
//! column 0, clipping at the area's right edge.  Fragments past the edge
//! are simply not drawn; nothing here can fail.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::statusbar::bar::Fragment;

use super::theme::Theme;

/// One-row widget rendering the engine's output — created fresh each frame.
pub struct StatusLine<'a> {
    fragments: &'a [Fragment],
}

impl<'a> StatusLine<'a> {
    pub fn new(fragments: &'a [Fragment]) -> Self {
        Self { fragments }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let y = area.y;

        // Erase the row first so stale content never shows through.
        let blank = " ".repeat(area.width as usize);
        buf.set_string(area.x, y, &blank, Theme::status_bar_style());

        let right_edge = area.right();
        let mut x = area.x;
        for fragment in self.fragments {
            if x >= right_edge {
                break;
            }
            let (next_x, _) = buf.set_stringn(
                x,
                y,
                &fragment.text,
                (right_edge - x) as usize,
                Theme::fragment_style(fragment.style),
            );
            x = next_x;
        }
    }
}
