//! Runtime settings with an explicit redraw-subscription list.
//!
//! Widgets that must react to a setting change register a shared boolean
//! flag; every change sets all registered flags.  Subscribers unsubscribe
//! explicitly on teardown — there is no weak-reference magic.

use std::cell::Cell;
use std::rc::Rc;

/// Token returned by [`Settings::subscribe`]; pass it back to
/// [`Settings::unsubscribe`] on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// The settings the status line observes.
pub struct Settings {
    display_size_in_status_bar: bool,
    subscribers: Vec<(SubscriptionId, Rc<Cell<bool>>)>,
    next_id: u64,
}

impl Settings {
    pub fn new(display_size_in_status_bar: bool) -> Self {
        Self {
            display_size_in_status_bar,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn display_size_in_status_bar(&self) -> bool {
        self.display_size_in_status_bar
    }

    pub fn set_display_size_in_status_bar(&mut self, value: bool) {
        if self.display_size_in_status_bar != value {
            self.display_size_in_status_bar = value;
            self.notify_all();
        }
    }

    /// Register a redraw flag; it is set on every settings change.
    pub fn subscribe(&mut self, flag: Rc<Cell<bool>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, flag));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    fn notify_all(&self) {
        for (_, flag) in &self.subscribers {
            flag.set(true);
        }
    }
}
