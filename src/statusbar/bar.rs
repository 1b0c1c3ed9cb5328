//! Styled text fragments and the two-sided bar they are collected in.
//!
//! A [`Bar`] holds an ordered `left` and `right` sequence of [`Fragment`]s.
//! Once both sides are composed it is shrunk to the drawing width and
//! combined into the final fragment sequence handed to the renderer.

/// Style identity of a fragment.  The theme maps these to concrete
/// terminal styles; the engine itself never touches colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentStyle {
    #[default]
    Plain,
    /// Positive accent — owned permissions, resolving symlinks, good messages.
    Good,
    /// Negative accent — foreign permissions, broken symlinks, bad messages.
    Bad,
    /// Highlighted hint segment.
    Highlight,
    /// Separator / spacer text.
    Space,
    /// The "Mrk" marker indicator.
    Marked,
    /// Scroll position indicator (Top / Bot / All / percentage).
    Scroll,
}

/// A unit of styled text, immutable once composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub style: FragmentStyle,
}

impl Fragment {
    pub fn new(text: impl Into<String>, style: FragmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Display width in character cells.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn truncate_to(&mut self, width: usize) {
        self.text = self.text.chars().take(width).collect();
    }
}

/// One side of the bar — an ordered, append-only fragment list.
#[derive(Debug, Default)]
pub struct Side(Vec<Fragment>);

impl Side {
    pub fn add(&mut self, text: impl Into<String>, style: FragmentStyle) {
        self.0.push(Fragment::new(text, style));
    }

    pub fn add_space(&mut self) {
        self.add(" ", FragmentStyle::Space);
    }

    fn width(&self) -> usize {
        self.0.iter().map(Fragment::width).sum()
    }
}

/// The status bar under composition: `left` + `right`, combined after shrink.
#[derive(Debug, Default)]
pub struct Bar {
    pub left: Side,
    pub right: Side,
}

impl Bar {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_width(&self) -> usize {
        self.left.width() + self.right.width()
    }

    fn fragment_count(&self) -> usize {
        self.left.0.len() + self.right.0.len()
    }

    /// Fit the bar into `width` character cells.
    ///
    /// Removal order, lowest priority first: whole fragments are popped
    /// from the tail of `right`, then from the tail of `left`.  A fragment
    /// is only ever truncated when it is the sole survivor; fragments that
    /// remain are otherwise untouched, so the result is a prefix-preserving
    /// subsequence of the original.
    pub fn shrink_to_fit(&mut self, width: usize) {
        while self.total_width() > width && self.fragment_count() > 1 {
            if self.right.0.pop().is_none() {
                self.left.0.pop();
            }
        }
        if self.total_width() > width {
            if let Some(frag) = self.left.0.first_mut().or_else(|| self.right.0.first_mut()) {
                frag.truncate_to(width);
            }
        }
    }

    /// Final rendering order: `left` then `right`, drawn from column 0.
    pub fn combine(self) -> Vec<Fragment> {
        let mut result = self.left.0;
        result.extend(self.right.0);
        result
    }
}
