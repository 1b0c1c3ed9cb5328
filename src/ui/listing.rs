//! Directory listing pane — one row per entry, with pointer and marks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::column::Column;

use super::theme::Theme;

/// The listing widget — created fresh each frame.
pub struct Listing<'a> {
    column: &'a Column,
    block: Option<Block<'a>>,
}

impl<'a> Listing<'a> {
    pub fn new(column: &'a Column) -> Self {
        Self {
            column,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for Listing<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.height == 0 {
            return;
        }

        let Some(files) = self.column.files.as_ref() else {
            let line = Line::from(Span::styled("  (unreadable)", Theme::border_style()));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        };

        let visible = files
            .iter()
            .enumerate()
            .skip(self.column.offset)
            .take(inner.height as usize);

        for (i, (idx, entry)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let pointed = idx == self.column.pointed;
            let marked = self.column.is_marked(entry.id);

            let style = if pointed {
                Theme::pointed_style()
            } else if marked {
                Theme::marked_style()
            } else if entry.is_link {
                Theme::symlink_style()
            } else if entry.is_dir() {
                Theme::dir_style()
            } else {
                Theme::file_style()
            };

            let mark_ch = if marked { "*" } else { " " };
            let suffix = if entry.is_dir() { "/" } else { "" };
            let line = Line::from(Span::styled(
                format!("{mark_ch}{}{suffix}", entry.name),
                style,
            ));
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
