//! hold-core: press-duration detection primitives.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic.
//! Device-specific event translation (mouse hook, touch phases) lives in
//! `hold-platform`.

mod config;
mod detector;
mod driver;
mod timer;

pub use config::{ConfigError, PressConfig};
pub use detector::{PressDetector, PressOutput, TimerOp};
pub use driver::{
    ClosureSink, DriverCommand, DriverHandle, PressDriver, PressNotifier, PressSink,
};
pub use timer::{PendingTimer, TimerSpec};

use serde::{Deserialize, Serialize};

/// Input modality of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Touch,
    Mouse,
}

/// Mouse button carried by a mouse press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl MouseButton {
    /// The primary button is the left one on every platform we target.
    pub fn is_primary(self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// Raw event payload carried by a press start and handed back to the
/// long-press sink when the hold threshold elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Button for mouse input; `None` for touch.
    pub button: Option<MouseButton>,
    /// Screen position at press time.
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    /// A touch contact at the given position.
    pub fn touch(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Touch,
            button: None,
            x,
            y,
        }
    }

    /// A mouse press with the given button.
    pub fn mouse(button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Mouse,
            button: Some(button),
            x,
            y,
        }
    }
}

/// Canonical notifications the detector consumes. Device adapters
/// translate raw input into these before anything reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerNotification {
    /// Pointer went down.
    Start(PointerEvent),
    /// Pointer moved. Treated as a stop signal for an active press.
    Move,
    /// Pointer went up.
    End,
    /// The press was aborted by the host (focus loss, palm rejection, ...).
    Cancel,
}

/// Press detector states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressState {
    /// No press in progress.
    Idle,
    /// Waiting for the hold threshold to fire one long press.
    ArmedSingle,
    /// Periodic ticking active for a held press.
    FiringContinuous,
}

impl Default for PressState {
    fn default() -> Self {
        Self::Idle
    }
}
