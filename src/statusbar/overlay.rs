//! Transient overlays — keybinding hints and timed messages.
//!
//! At most one hint and one message exist at a time.  An active hint wins
//! over an alive message, which wins over normal composed content; the
//! precedence check itself lives in the status bar's draw pipeline.

use std::time::{Duration, Instant};

use super::bar::{Fragment, FragmentStyle};

/// One segment of a hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintSegment {
    pub text: String,
    pub highlighted: bool,
}

/// A hint: alternating plain/highlighted segments, produced once by the
/// caller and kept until explicitly cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hint {
    segments: Vec<HintSegment>,
}

impl Hint {
    pub fn new(segments: Vec<HintSegment>) -> Self {
        Self { segments }
    }

    /// Parse the `//`-delimited markup convention: segments alternate
    /// plain, highlighted, plain, … starting with plain.
    pub fn from_markup(markup: &str) -> Self {
        let segments = markup
            .split("//")
            .enumerate()
            .map(|(i, text)| HintSegment {
                text: text.to_string(),
                highlighted: i % 2 == 1,
            })
            .collect();
        Self { segments }
    }

    /// A hint is only "active" while it has visible text.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }

    pub fn segments(&self) -> &[HintSegment] {
        &self.segments
    }

    /// Render the hint as a fragment sequence, left to right.  Width
    /// clipping happens at the renderer; segments past the edge are
    /// simply never painted.
    pub fn fragments(&self) -> Vec<Fragment> {
        self.segments
            .iter()
            .map(|s| {
                let style = if s.highlighted {
                    FragmentStyle::Highlight
                } else {
                    FragmentStyle::Plain
                };
                Fragment::new(s.text.clone(), style)
            })
            .collect()
    }
}

/// A timed notification.  Immutable; dropped once expired or replaced.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub bad: bool,
    expire_at: Instant,
}

impl Message {
    pub fn new(text: impl Into<String>, duration: Duration, bad: bool, now: Instant) -> Self {
        Self {
            text: text.into(),
            bad,
            expire_at: now + duration,
        }
    }

    /// Alive for every instant up to and including the expiry time.
    pub fn is_alive(&self, now: Instant) -> bool {
        now <= self.expire_at
    }
}

/// Holds the (at most one) hint and (at most one) message.
#[derive(Debug, Default)]
pub struct OverlayManager {
    hint: Option<Hint>,
    message: Option<Message>,
}

impl OverlayManager {
    /// Install or clear the hint.  Empty hints count as cleared.
    pub fn set_hint(&mut self, hint: Option<Hint>) {
        self.hint = hint.filter(|h| !h.is_empty());
    }

    /// The active hint, if any.
    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    /// Create a message, unconditionally replacing any existing one.
    pub fn notify(&mut self, text: impl Into<String>, duration: Duration, bad: bool, now: Instant) {
        self.message = Some(Message::new(text, duration, bad, now));
    }

    /// Drop the message once it is past its expiry.  Returns `true` when
    /// one was dropped, which must force a redraw of normal content.
    pub fn expire_message(&mut self, now: Instant) -> bool {
        match &self.message {
            Some(msg) if !msg.is_alive(now) => {
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// The alive message, if any.  Call [`expire_message`] first.
    ///
    /// [`expire_message`]: OverlayManager::expire_message
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_alternates_starting_plain() {
        let hint = Hint::from_markup("a//b//c");
        let segs = hint.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!((segs[0].text.as_str(), segs[0].highlighted), ("a", false));
        assert_eq!((segs[1].text.as_str(), segs[1].highlighted), ("b", true));
        assert_eq!((segs[2].text.as_str(), segs[2].highlighted), ("c", false));
    }

    #[test]
    fn hint_fragments_preserve_order_and_style() {
        let hint = Hint::from_markup("press //q// to quit");
        let frags = hint.fragments();
        let texts: Vec<&str> = frags.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["press ", "q", " to quit"]);
        assert_eq!(frags[1].style, FragmentStyle::Highlight);
        assert_eq!(frags[2].style, FragmentStyle::Plain);
    }

    #[test]
    fn empty_markup_is_inactive() {
        assert!(Hint::from_markup("").is_empty());
        let mut overlays = OverlayManager::default();
        overlays.set_hint(Some(Hint::from_markup("")));
        assert!(overlays.hint().is_none());
    }

    #[test]
    fn message_lifecycle() {
        let t0 = Instant::now();
        let msg = Message::new("x", Duration::from_secs(4), false, t0);
        assert!(msg.is_alive(t0));
        assert!(msg.is_alive(t0 + Duration::from_secs(4)));
        assert!(!msg.is_alive(t0 + Duration::from_millis(4001)));
    }

    #[test]
    fn new_message_replaces_old_unconditionally() {
        let t0 = Instant::now();
        let mut overlays = OverlayManager::default();
        overlays.notify("first", Duration::from_secs(60), false, t0);
        overlays.notify("second", Duration::from_secs(1), true, t0);
        let msg = overlays.message().unwrap();
        assert_eq!(msg.text, "second");
        assert!(msg.bad);
        // The replacement's (shorter) duration is what counts now.
        assert!(overlays.expire_message(t0 + Duration::from_secs(2)));
        assert!(overlays.message().is_none());
    }

    #[test]
    fn expire_is_a_noop_while_alive() {
        let t0 = Instant::now();
        let mut overlays = OverlayManager::default();
        overlays.notify("x", Duration::from_secs(4), false, t0);
        assert!(!overlays.expire_message(t0 + Duration::from_secs(3)));
        assert!(overlays.message().is_some());
    }
}
