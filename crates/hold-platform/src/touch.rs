//! Touch adapter: lets an embedding application feed touch contact
//! phases into a press driver without knowing the canonical notification
//! set.

use crate::translate::{translate_touch, TouchPhase};
use hold_core::PressNotifier;

/// Forwards touch contact phases to a press driver.
#[derive(Debug, Clone)]
pub struct TouchAdapter {
    notifier: PressNotifier,
}

impl TouchAdapter {
    pub fn new(notifier: PressNotifier) -> Self {
        Self { notifier }
    }

    /// A finger went down at the given position.
    pub fn touch_started(&self, x: i32, y: i32) {
        self.notifier.notify(translate_touch(TouchPhase::Started { x, y }));
    }

    /// The finger moved while down.
    pub fn touch_moved(&self) {
        self.notifier.notify(translate_touch(TouchPhase::Moved));
    }

    /// The finger lifted.
    pub fn touch_ended(&self) {
        self.notifier.notify(translate_touch(TouchPhase::Ended));
    }

    /// The host aborted the contact.
    pub fn touch_cancelled(&self) {
        self.notifier.notify(translate_touch(TouchPhase::Cancelled));
    }
}
