//! Pure translation of device events into canonical notifications.

use hold_core::{MouseButton, PointerEvent, PointerNotification};
use serde::{Deserialize, Serialize};

/// Map an rdev button onto the core button type.
fn map_button(button: rdev::Button) -> MouseButton {
    match button {
        rdev::Button::Left => MouseButton::Left,
        rdev::Button::Right => MouseButton::Right,
        rdev::Button::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

/// Translate one rdev event into a canonical notification.
///
/// `last_pos` is the cursor position from the most recent move; rdev
/// button events carry no coordinates of their own. Wheel and keyboard
/// events do not participate in press detection.
pub fn translate_mouse(
    event: &rdev::EventType,
    last_pos: (i32, i32),
) -> Option<PointerNotification> {
    match event {
        rdev::EventType::ButtonPress(button) => Some(PointerNotification::Start(
            PointerEvent::mouse(map_button(*button), last_pos.0, last_pos.1),
        )),
        rdev::EventType::ButtonRelease(_) => Some(PointerNotification::End),
        rdev::EventType::MouseMove { .. } => Some(PointerNotification::Move),
        _ => None,
    }
}

/// Touch contact phases as reported by host toolkits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    /// A finger went down at the given position.
    Started { x: i32, y: i32 },
    /// The finger moved while down.
    Moved,
    /// The finger lifted.
    Ended,
    /// The host aborted the contact.
    Cancelled,
}

/// Translate one touch phase into a canonical notification.
pub fn translate_touch(phase: TouchPhase) -> PointerNotification {
    match phase {
        TouchPhase::Started { x, y } => {
            PointerNotification::Start(PointerEvent::touch(x, y))
        }
        TouchPhase::Moved => PointerNotification::Move,
        TouchPhase::Ended => PointerNotification::End,
        TouchPhase::Cancelled => PointerNotification::Cancel,
    }
}
