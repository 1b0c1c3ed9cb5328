//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::core::column::Column;
use crate::statusbar::names::NameCache;
use crate::statusbar::StatusBar;

use super::settings::{Settings, SubscriptionId};

/// Top-level application state.
pub struct AppState {
    /// The active browse column.
    pub column: Column,
    /// Settings the status line observes.
    pub settings: Settings,
    /// The status-line engine.
    pub status: StatusBar,
    /// Subscription token for the status bar's redraw flag; released on
    /// teardown.
    pub status_sub: SubscriptionId,
    /// Persisted configuration.
    pub config: AppConfig,
    /// Show dot-prefixed entries.
    pub show_hidden: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Set by handlers when the column's disk usage must be recomputed.
    pub needs_du_recompute: bool,
    /// Monotonic generation id used to ignore stale disk-usage results.
    pub du_generation: u64,
    /// Whether the key-help hint is currently shown.
    pub hint_shown: bool,
    /// Effective uid, observed once at startup.
    pub euid: u32,
}

impl AppState {
    pub fn new(path: PathBuf, config: AppConfig) -> Self {
        let names = Rc::new(RefCell::new(NameCache::new()));
        let status = StatusBar::new(names);
        let mut settings = Settings::new(config.display_size_in_status_bar);
        let status_sub = settings.subscribe(status.redraw_flag());

        let mut column = Column::new(path);
        let show_hidden = config.show_hidden;
        column.load(show_hidden);

        Self {
            column,
            settings,
            status,
            status_sub,
            config,
            show_hidden,
            should_quit: false,
            needs_du_recompute: true,
            du_generation: 0,
            hint_shown: false,
            euid: effective_uid(),
        }
    }

    /// Navigate the column to `path` and reload it.
    pub fn enter(&mut self, path: PathBuf) {
        self.column.path = path;
        self.reload();
    }

    /// Re-read the current directory and schedule a disk-usage walk.
    pub fn reload(&mut self) {
        self.column.load(self.show_hidden);
        self.needs_du_recompute = true;
    }
}

#[cfg(unix)]
fn effective_uid() -> u32 {
    nix::unistd::Uid::effective().as_raw()
}

#[cfg(not(unix))]
fn effective_uid() -> u32 {
    0
}
