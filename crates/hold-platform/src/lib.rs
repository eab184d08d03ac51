//! hold-platform: device-facing adapters for hold.
//!
//! This crate translates raw device input into the canonical pointer
//! notifications consumed by `hold-core`, so touch and mouse share one
//! state machine:
//! - Global mouse hook via `rdev`
//! - Touch phase adapter fed by the embedding application
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `translate` - Pure device-event translation
//! - `hook` - Global mouse hook feeding a press driver
//! - `touch` - Touch phase adapter

mod error;
mod hook;
mod touch;
mod translate;

// Re-export error types
pub use error::{PlatformError, PlatformResult};

// Re-export the mouse hook
pub use hook::{start_mouse_hook, MouseHookHandle};

// Re-export the touch adapter
pub use touch::TouchAdapter;

// Re-export translation primitives
pub use translate::{translate_mouse, translate_touch, TouchPhase};
