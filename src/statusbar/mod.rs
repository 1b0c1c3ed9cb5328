//! The status-line engine.
//!
//! One [`StatusBar::draw`] call per UI tick: a fingerprint check decides
//! whether anything needs recomposing; overlays (hint, then message)
//! take precedence over normal content; normal content is composed,
//! shrunk to the line width and cached until the fingerprint changes.
//! The returned fragment sequence is painted by `ui::statusline` — the
//! engine itself never touches the terminal.

pub mod bar;
pub mod compose;
pub mod dirty;
pub mod names;
pub mod overlay;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::core::column::Column;
use crate::core::entry::Entry;

use self::bar::{Bar, Fragment, FragmentStyle};
use self::dirty::{DirtyStateTracker, RedrawFingerprint};
use self::names::NameCache;
use self::overlay::{Hint, OverlayManager};

/// Everything the engine observes in one frame, borrowed read-only from
/// the surrounding application.
pub struct StatusContext<'a> {
    /// The pointed-at file, already resolved by the caller.
    pub file: Option<&'a Entry>,
    /// The active column.
    pub column: Option<&'a Column>,
    /// Rows visible in the listing pane.
    pub height: usize,
    /// Whether the size/type infostring is shown in the left part.
    pub display_size: bool,
    /// Effective uid of this process.
    pub euid: u32,
    /// Line width in character cells.
    pub width: usize,
    /// Frame timestamp, used for message expiry.
    pub now: Instant,
}

/// One status-bar instance.  Owns its overlays, fingerprint history and
/// cached result; shares the name cache with any sibling instances.
pub struct StatusBar {
    names: Rc<RefCell<NameCache>>,
    overlays: OverlayManager,
    tracker: DirtyStateTracker,
    result: Option<Vec<Fragment>>,
    /// Shared flag external parties (the settings subscription) may set.
    redraw_requested: Rc<Cell<bool>>,
    need_redraw: bool,
    frames_composed: u64,
}

impl StatusBar {
    pub fn new(names: Rc<RefCell<NameCache>>) -> Self {
        Self {
            names,
            overlays: OverlayManager::default(),
            tracker: DirtyStateTracker::default(),
            result: None,
            redraw_requested: Rc::new(Cell::new(false)),
            need_redraw: false,
            frames_composed: 0,
        }
    }

    /// Handle to the redraw-request flag, for registering with the
    /// settings subscription list.
    pub fn redraw_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.redraw_requested)
    }

    /// Force the next [`draw`](StatusBar::draw) to recompute regardless
    /// of the fingerprint.
    pub fn request_redraw(&mut self) {
        self.need_redraw = true;
    }

    /// Create or replace the timed message.
    pub fn notify(&mut self, text: impl Into<String>, duration_secs: u64, bad: bool) {
        self.overlays
            .notify(text, Duration::from_secs(duration_secs), bad, Instant::now());
        self.need_redraw = true;
    }

    /// Install a hint from `//`-delimited markup.
    pub fn set_hint_markup(&mut self, markup: &str) {
        self.overlays.set_hint(Some(Hint::from_markup(markup)));
    }

    /// Install a pre-built hint.
    pub fn set_hint(&mut self, hint: Hint) {
        self.overlays.set_hint(Some(hint));
    }

    pub fn clear_hint(&mut self) {
        self.overlays.set_hint(None);
    }

    /// Run one frame of the pipeline and return what should be on screen.
    /// Idempotent while nothing observable changes — the cached fragment
    /// sequence is returned without recomposition.
    pub fn draw(&mut self, ctx: &StatusContext) -> &[Fragment] {
        if self.redraw_requested.take() {
            self.need_redraw = true;
        }
        if self.overlays.expire_message(ctx.now) {
            self.need_redraw = true;
        }

        let fingerprint = observe(ctx, self.overlays.hint());
        if self.tracker.should_redraw(&fingerprint, self.result.is_some()) {
            self.need_redraw = true;
        }

        if self.need_redraw {
            self.need_redraw = false;
            self.frames_composed += 1;
            let fragments = self.compose_frame(ctx);
            self.result = Some(fragments);
        }
        self.result.as_deref().unwrap_or(&[])
    }

    /// Overlay precedence: active hint, then alive message, then the
    /// composed left/right bar.
    fn compose_frame(&self, ctx: &StatusContext) -> Vec<Fragment> {
        if let Some(hint) = self.overlays.hint() {
            return hint.fragments();
        }
        if let Some(msg) = self.overlays.message() {
            let style = if msg.bad {
                FragmentStyle::Bad
            } else {
                FragmentStyle::Good
            };
            return vec![Fragment::new(msg.text.clone(), style)];
        }

        let mut bar = Bar::new();
        compose::compose(&mut bar, ctx, &mut self.names.borrow_mut());
        bar.shrink_to_fit(ctx.width);
        bar.combine()
    }
}

fn observe(ctx: &StatusContext, hint: Option<&Hint>) -> RedrawFingerprint {
    RedrawFingerprint {
        file_id: ctx.file.map(|f| f.id),
        mtime: ctx.file.and_then(|f| f.stat.as_ref()).map(|s| s.mtime),
        has_disk_usage: ctx.column.map_or(false, |c| c.disk_usage.is_some()),
        hint: hint.cloned(),
    }
}
