//! Redraw suppression — fingerprint the observed inputs each frame and
//! only recompose when something that matters actually changed.

use std::time::SystemTime;

use super::overlay::Hint;

/// The minimal set of observed values that decides whether recomposition
/// is necessary.  File identity is the entry's id — same underlying
/// object, not same content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedrawFingerprint {
    pub file_id: Option<u64>,
    pub mtime: Option<SystemTime>,
    pub has_disk_usage: bool,
    pub hint: Option<Hint>,
}

/// Compares each frame's fingerprint against the previous one.  Fields
/// are independently sticky: an unrelated change never resets another
/// field's stored value.
#[derive(Debug, Default)]
pub struct DirtyStateTracker {
    prev_file: Option<u64>,
    prev_mtime: Option<SystemTime>,
    prev_disk_usage: bool,
    prev_hint: Option<Hint>,
}

impl DirtyStateTracker {
    /// Decide whether this frame needs recomposition, updating the stored
    /// previous values along the way.
    ///
    /// Redraw triggers: no cached result, file identity change, mtime
    /// change, disk usage becoming newly available, or any hint change
    /// (including to/from absent).
    pub fn should_redraw(&mut self, current: &RedrawFingerprint, has_result: bool) -> bool {
        let mut redraw = !has_result;

        if self.prev_file != current.file_id {
            self.prev_file = current.file_id;
            redraw = true;
        }
        if self.prev_mtime != current.mtime {
            self.prev_mtime = current.mtime;
            redraw = true;
        }
        if !self.prev_disk_usage && current.has_disk_usage {
            redraw = true;
        }
        self.prev_disk_usage = current.has_disk_usage;
        if self.prev_hint != current.hint {
            self.prev_hint = current.hint.clone();
            redraw = true;
        }

        redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fp(file_id: Option<u64>) -> RedrawFingerprint {
        RedrawFingerprint {
            file_id,
            mtime: Some(SystemTime::UNIX_EPOCH),
            has_disk_usage: false,
            hint: None,
        }
    }

    #[test]
    fn first_frame_always_redraws() {
        let mut tracker = DirtyStateTracker::default();
        assert!(tracker.should_redraw(&fp(Some(1)), false));
    }

    #[test]
    fn unchanged_fingerprint_with_result_skips() {
        let mut tracker = DirtyStateTracker::default();
        assert!(tracker.should_redraw(&fp(Some(1)), false));
        assert!(!tracker.should_redraw(&fp(Some(1)), true));
        assert!(!tracker.should_redraw(&fp(Some(1)), true));
    }

    #[test]
    fn missing_result_redraws_even_when_unchanged() {
        let mut tracker = DirtyStateTracker::default();
        assert!(tracker.should_redraw(&fp(Some(1)), false));
        assert!(tracker.should_redraw(&fp(Some(1)), false));
    }

    #[test]
    fn file_identity_change_redraws() {
        let mut tracker = DirtyStateTracker::default();
        tracker.should_redraw(&fp(Some(1)), false);
        assert!(tracker.should_redraw(&fp(Some(2)), true));
        assert!(!tracker.should_redraw(&fp(Some(2)), true));
    }

    #[test]
    fn mtime_change_redraws() {
        let mut tracker = DirtyStateTracker::default();
        tracker.should_redraw(&fp(Some(1)), false);
        let mut changed = fp(Some(1));
        changed.mtime = Some(SystemTime::UNIX_EPOCH + Duration::from_secs(10));
        assert!(tracker.should_redraw(&changed, true));
        assert!(!tracker.should_redraw(&changed, true));
    }

    #[test]
    fn disk_usage_redraws_only_on_absent_to_present() {
        let mut tracker = DirtyStateTracker::default();
        tracker.should_redraw(&fp(Some(1)), false);

        let mut with_du = fp(Some(1));
        with_du.has_disk_usage = true;
        assert!(tracker.should_redraw(&with_du, true));
        assert!(!tracker.should_redraw(&with_du, true));

        // present → absent is not a trigger on its own…
        assert!(!tracker.should_redraw(&fp(Some(1)), true));
        // …but re-arming works: the next appearance triggers again.
        assert!(tracker.should_redraw(&with_du, true));
    }

    #[test]
    fn hint_transitions_redraw() {
        let mut tracker = DirtyStateTracker::default();
        tracker.should_redraw(&fp(Some(1)), false);

        let mut hinted = fp(Some(1));
        hinted.hint = Some(Hint::from_markup("press //q//"));
        assert!(tracker.should_redraw(&hinted, true));
        assert!(!tracker.should_redraw(&hinted, true));

        // Clearing the hint is itself one forced redraw.
        assert!(tracker.should_redraw(&fp(Some(1)), true));
        assert!(!tracker.should_redraw(&fp(Some(1)), true));
    }

    #[test]
    fn fields_are_independently_sticky() {
        let mut tracker = DirtyStateTracker::default();
        tracker.should_redraw(&fp(Some(1)), false);

        // A hint change must not reset the remembered file identity.
        let mut hinted = fp(Some(1));
        hinted.hint = Some(Hint::from_markup("x"));
        assert!(tracker.should_redraw(&hinted, true));

        let mut cleared = fp(Some(1));
        cleared.hint = None;
        assert!(tracker.should_redraw(&cleared, true));
        // Same file as frame one — no redraw for it.
        assert!(!tracker.should_redraw(&fp(Some(1)), true));
    }
}
