//! Long-press policy for the backspace key
//!
//! A short press removes one character; holding the key past the threshold
//! clears the whole entry. The caller feeds in timestamps so the policy does
//! not depend on a clock.

use std::time::{Duration, Instant};

/// Default hold time before backspace turns into clear
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(500);

/// What a press resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    Backspace,
    Clear,
}

#[derive(Debug, Clone)]
pub struct LongPress {
    threshold: Duration,
    pressed_at: Option<Instant>,
    fired: bool,
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS)
    }
}

impl LongPress {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pressed_at: None,
            fired: false,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Whether the key is currently held
    pub fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Key went down. A repeated press while held keeps the original start.
    pub fn press(&mut self, now: Instant) {
        if self.pressed_at.is_none() {
            self.pressed_at = Some(now);
            self.fired = false;
        }
    }

    /// Fires `Clear` once when the key has been held past the threshold
    pub fn poll(&mut self, now: Instant) -> Option<PressAction> {
        let pressed_at = self.pressed_at?;
        if !self.fired && now.saturating_duration_since(pressed_at) >= self.threshold {
            self.fired = true;
            return Some(PressAction::Clear);
        }
        None
    }

    /// Key went up. A short press resolves to `Backspace`.
    pub fn release(&mut self, now: Instant) -> Option<PressAction> {
        // a release that arrives late still counts as a long press
        let long = self.poll(now);
        let pressed = self.pressed_at.take().is_some();
        let fired = std::mem::replace(&mut self.fired, false);

        match (pressed, long) {
            (_, Some(action)) => Some(action),
            (true, None) if !fired => Some(PressAction::Backspace),
            _ => None,
        }
    }

    /// Abandon the current press without firing anything
    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.fired = false;
    }
}
